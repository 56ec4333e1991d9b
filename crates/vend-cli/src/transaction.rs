//! # Transaction Controller
//!
//! One purchase, driven as a state machine:
//!
//! ```text
//! SELECTING ──► PAYING ──► DISPENSED ──► SUGGESTING ──► DONE
//!   ▲    │        ▲   │                    │
//!   └────┘        └───┘                    └─► one add-on (SELECTING ► PAYING)
//!  invalid /    malformed /
//!  sold out     insufficient
//! ```
//!
//! Every buyer mistake is reported through the localizer and the same state
//! asks again. Only I/O failures, closed input and template defects escape.

use crate::error::{KioskError, KioskResult};
use crate::terminal::Terminal;
use tracing::{debug, info, instrument};
use vend_core::{
    parse_yes_no, Catalog, I18nResult, InputError, Localizer, Price, Product, Sale,
    SuggestionEngine,
};

/// Typed at the selection prompt to go back to language selection
pub const LANGUAGE_TOKEN: &str = "lang";

/// Result of the SELECTING state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// An existing, available product code
    Product(String),
    /// Buyer asked to change the language
    SwitchLanguage,
}

/// Result of one pass through the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Transaction {
    /// Primary purchase dispensed, plus the add-on if one was bought
    Completed { sale: Sale, add_on: Option<Sale> },
    /// Buyer typed the language token instead of a product code
    LanguageRequested,
}

/// Drives one purchase against the session's catalog
pub struct TransactionController<'a, T: Terminal> {
    terminal: &'a mut T,
    localizer: &'a Localizer,
    catalog: &'a mut Catalog,
    suggestions: &'a SuggestionEngine,
}

impl<'a, T: Terminal> TransactionController<'a, T> {
    pub fn new(
        terminal: &'a mut T,
        localizer: &'a Localizer,
        catalog: &'a mut Catalog,
        suggestions: &'a SuggestionEngine,
    ) -> Self {
        Self {
            terminal,
            localizer,
            catalog,
            suggestions,
        }
    }

    /// Run SELECTING through SUGGESTING
    #[instrument(skip_all)]
    pub fn run(&mut self) -> KioskResult<Transaction> {
        let code = match self.select(true)? {
            Selection::Product(code) => code,
            Selection::SwitchLanguage => return Ok(Transaction::LanguageRequested),
        };

        let sale = self.pay(&code, false)?;
        let add_on = self.offer_add_on(&code)?;
        Ok(Transaction::Completed { sale, add_on })
    }

    /// SELECTING: show the menu until the buyer picks an available product
    pub fn select(&mut self, allow_language_switch: bool) -> KioskResult<Selection> {
        loop {
            for line in menu_lines(self.localizer, self.catalog)? {
                self.terminal.write_line(&line)?;
            }
            if allow_language_switch {
                self.terminal.write_line(&self.localizer.text("language_hint"))?;
            }

            let input = self.terminal.ask(&self.localizer.text("select_product"))?;
            let input = input.trim();

            if allow_language_switch && input.eq_ignore_ascii_case(LANGUAGE_TOKEN) {
                return Ok(Selection::SwitchLanguage);
            }

            match check_selection(self.catalog, input) {
                Ok(code) => return Ok(Selection::Product(code)),
                Err(err) => report(self.terminal, self.localizer, &err)?,
            }
        }
    }

    /// PAYING: collect money until it covers the price, then dispense
    #[instrument(skip(self))]
    pub fn pay(&mut self, code: &str, add_on: bool) -> KioskResult<Sale> {
        loop {
            // price is read fresh on every attempt
            let product = self
                .catalog
                .lookup(code)
                .cloned()
                .ok_or_else(|| KioskError::ProductNotFound {
                    code: code.to_string(),
                })?;

            let announcement = self.localizer.resolve(
                "enter_payment",
                &[
                    ("product", product.name.clone()),
                    ("price", product.price.to_string()),
                ],
            )?;
            self.terminal.write_line(&announcement)?;

            let input = self.terminal.ask(&self.localizer.text("payment_prompt"))?;
            match check_payment(&product, &input) {
                Ok(sale) => {
                    let sale = if add_on { sale.as_add_on() } else { sale };
                    self.dispense(&sale)?;
                    return Ok(sale);
                }
                Err(err) => report(self.terminal, self.localizer, &err)?,
            }
        }
    }

    /// DISPENSED: announce, return change, take the unit out of stock
    fn dispense(&mut self, sale: &Sale) -> KioskResult<()> {
        self.terminal.write_line("")?;
        self.terminal.write_line(&format!(
            "{} {}!",
            self.localizer.text("dispensing"),
            sale.name
        ))?;
        let change = self
            .localizer
            .resolve("change_returned", &[("change", sale.change.to_string())])?;
        self.terminal.write_line(&change)?;

        self.catalog.decrement_stock(&sale.code);

        info!(
            sale_id = %sale.id,
            code = %sale.code,
            price = %sale.price,
            paid = %sale.paid,
            change = %sale.change,
            add_on = sale.add_on,
            "Dispensed product"
        );
        Ok(())
    }

    /// SUGGESTING: offer at most one add-on after the primary purchase
    pub fn offer_add_on(&mut self, purchased_code: &str) -> KioskResult<Option<Sale>> {
        let purchased = self
            .catalog
            .lookup(purchased_code)
            .cloned()
            .ok_or_else(|| KioskError::ProductNotFound {
                code: purchased_code.to_string(),
            })?;

        let offers: Vec<String> = self
            .suggestions
            .suggestions_for(self.catalog, &purchased)
            .iter()
            .map(|p| format!("- {} (${})", p.name, p.price))
            .collect();
        if offers.is_empty() {
            return Ok(None);
        }

        self.terminal
            .write_line(&self.localizer.text("recommended_addons"))?;
        for offer in &offers {
            self.terminal.write_line(offer)?;
        }

        if !confirm(self.terminal, self.localizer, "add_on_prompt")? {
            return Ok(None);
        }

        // the language token is only honoured at the primary prompt
        let Selection::Product(code) = self.select(false)? else {
            return Ok(None);
        };
        self.pay(&code, true).map(Some)
    }
}

/// Validate a selection against the catalog
pub fn check_selection(catalog: &Catalog, input: &str) -> Result<String, InputError> {
    match catalog.lookup(input) {
        None => Err(InputError::InvalidSelection {
            input: input.to_string(),
        }),
        Some(product) if !product.is_available() => Err(InputError::SoldOut {
            product: product.name.clone(),
        }),
        Some(product) => Ok(product.code.clone()),
    }
}

/// Validate a payment for `product` and record the sale
pub fn check_payment(product: &Product, input: &str) -> Result<Sale, InputError> {
    let paid = Price::parse(input).ok_or_else(|| InputError::MalformedAmount {
        input: input.trim().to_string(),
    })?;
    Sale::record(product, paid).ok_or(InputError::InsufficientPayment {
        required: product.price,
    })
}

/// Menu lines, grouped by category
pub fn menu_lines(localizer: &Localizer, catalog: &Catalog) -> I18nResult<Vec<String>> {
    let mut lines = vec![String::new(), localizer.text("menu_header")];

    for (category, products) in catalog.by_category() {
        lines.push(String::new());
        lines.push(localizer.resolve(
            "category_header",
            &[("category", localizer.text(category.key()))],
        )?);

        for product in products {
            let line = if product.is_available() {
                let stock = localizer.resolve("stock", &[("stock", product.stock.to_string())])?;
                format!(
                    "{}: {} - ${} ({})",
                    product.code, product.name, product.price, stock
                )
            } else {
                format!(
                    "{}: {} - {}",
                    product.code,
                    product.name,
                    localizer.text("sold_out_tag")
                )
            };
            lines.push(line);
        }
    }

    Ok(lines)
}

/// Ask a yes/no question until the answer is understood
pub fn confirm<T: Terminal>(terminal: &mut T, localizer: &Localizer, prompt_key: &str) -> KioskResult<bool> {
    loop {
        let input = terminal.ask(&localizer.text(prompt_key))?;
        match parse_yes_no(&input) {
            Ok(answer) => return Ok(answer),
            Err(err) => report(terminal, localizer, &err)?,
        }
    }
}

/// Show the localized message for a recoverable input error
pub fn report<T: Terminal>(terminal: &mut T, localizer: &Localizer, err: &InputError) -> KioskResult<()> {
    debug!(error = %err, "Rejected buyer input");
    let message = localizer.resolve(err.message_key(), &err.substitutions())?;
    terminal.write_line(&message)?;
    Ok(())
}
