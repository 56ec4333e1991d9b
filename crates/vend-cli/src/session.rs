//! # Session Loop
//!
//! Owns everything a buyer's visit needs: the terminal, the localizer, the
//! catalog and the sales so far. Runs transactions until the buyer declines
//! to buy another item.
//!
//! Choosing a language (at start-up or via the `lang` token) rebuilds the
//! catalog from its configuration, which puts every product back at its
//! starting stock.

use crate::error::{KioskError, KioskResult};
use crate::terminal::Terminal;
use crate::transaction::{confirm, Transaction, TransactionController};
use std::sync::Arc;
use tracing::{debug, info, warn};
use vend_core::{
    revenue, Catalog, CatalogConfig, I18nError, Language, LocalizationTable, Localizer, Price,
    Sale, SuggestionEngine,
};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Buyer answered "no" to buying another item
    Declined,
    /// Input reached end-of-file mid-conversation
    InputClosed,
}

/// What happened during a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub sales: Vec<Sale>,
    pub revenue: Price,
    pub ended_by: SessionEnd,
}

/// One buyer's visit to the machine
pub struct Session<T: Terminal> {
    terminal: T,
    localizer: Localizer,
    config: CatalogConfig,
    catalog: Catalog,
    suggestions: SuggestionEngine,
    sales: Vec<Sale>,
}

impl<T: Terminal> Session<T> {
    /// Create a session in the default language with a freshly built catalog
    pub fn new(terminal: T, table: Arc<LocalizationTable>, config: CatalogConfig) -> KioskResult<Self> {
        let localizer = Localizer::new(table, Language::default());
        let (catalog, suggestions) = config.build(&localizer)?;
        info!(products = catalog.len(), stock = catalog.total_stock(), "Catalog loaded");

        Ok(Self {
            terminal,
            localizer,
            config,
            catalog,
            suggestions,
            sales: Vec::new(),
        })
    }

    /// Run until the buyer leaves.
    ///
    /// With `preselected` set the language prompt is skipped. Closed input
    /// ends the session normally with [`SessionEnd::InputClosed`].
    pub fn run(&mut self, preselected: Option<Language>) -> KioskResult<SessionSummary> {
        let ended_by = match self.drive(preselected) {
            Ok(()) => SessionEnd::Declined,
            Err(KioskError::InputClosed) => {
                warn!("Input closed before the buyer finished");
                SessionEnd::InputClosed
            }
            Err(e) => return Err(e),
        };

        let summary = SessionSummary {
            sales: self.sales.clone(),
            revenue: revenue(&self.sales),
            ended_by,
        };
        info!(
            sales = summary.sales.len(),
            revenue = %summary.revenue,
            ended_by = ?summary.ended_by,
            "Session finished"
        );
        Ok(summary)
    }

    fn drive(&mut self, preselected: Option<Language>) -> KioskResult<()> {
        if let Some(language) = preselected {
            self.apply_language(language)?;
        }
        self.terminal.write_line(&self.localizer.text("welcome"))?;
        self.terminal.write_line("")?;
        if preselected.is_none() {
            self.select_language()?;
        }

        loop {
            let outcome = TransactionController::new(
                &mut self.terminal,
                &self.localizer,
                &mut self.catalog,
                &self.suggestions,
            )
            .run()?;

            match outcome {
                Transaction::LanguageRequested => {
                    self.select_language()?;
                    continue;
                }
                Transaction::Completed { sale, add_on } => {
                    self.sales.push(sale);
                    self.sales.extend(add_on);
                }
            }

            if !confirm(&mut self.terminal, &self.localizer, "yes_no_prompt")? {
                self.terminal.write_line(&self.localizer.text("thank_you"))?;
                return Ok(());
            }
        }
    }

    /// Prompt until a supported language is chosen, then rebuild the catalog
    pub fn select_language(&mut self) -> KioskResult<Language> {
        loop {
            let input = self.terminal.ask(&self.localizer.text("language_prompt"))?;
            match self.localizer.set_language(&input) {
                Ok(language) => {
                    self.rebuild_catalog()?;
                    return Ok(language);
                }
                Err(err @ I18nError::UnsupportedLanguage { .. }) => {
                    debug!(error = %err, "Rejected language choice");
                    self.terminal
                        .write_line(&self.localizer.text("invalid_language"))?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Switch to `language` and rebuild the catalog
    pub fn apply_language(&mut self, language: Language) -> KioskResult<()> {
        self.localizer.set(language);
        self.rebuild_catalog()
    }

    fn rebuild_catalog(&mut self) -> KioskResult<()> {
        let (catalog, suggestions) = self.config.build(&self.localizer)?;
        self.catalog = catalog;
        self.suggestions = suggestions;
        info!(
            language = %self.localizer.language(),
            products = self.catalog.len(),
            stock = self.catalog.total_stock(),
            "Catalog initialized"
        );
        Ok(())
    }

    /// Current catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current localizer
    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    /// Sales so far
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Consume the session and hand back the terminal
    pub fn into_terminal(self) -> T {
        self.terminal
    }
}
