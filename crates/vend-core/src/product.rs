//! # Product Types
//!
//! Product and catalog types for the vending kiosk.
//! The catalog is built from a [`CatalogConfig`](crate::config::CatalogConfig)
//! once per language selection and mutated only by successful sales.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

/// Monetary amount in cents.
///
/// The kiosk handles a single two-decimal currency. `Display` renders the bare
/// two-decimal amount (`2.99`) because message templates carry the symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in cents
    pub amount: i64,
}

impl Price {
    /// Create a price from a decimal amount, rounded to the nearest cent
    pub fn new(amount: f64) -> Self {
        Self {
            amount: (amount * 100.0).round() as i64,
        }
    }

    /// Create a price from cents
    pub const fn from_cents(amount: i64) -> Self {
        Self { amount }
    }

    /// Parse buyer input such as `3`, `3.00`, `.5` or ` -2.5 `.
    ///
    /// Amounts are exact: more than two decimals, exponents, non-numbers and
    /// values outside the cent range all yield `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (negative, unsigned) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input.strip_prefix('+').unwrap_or(input)),
        };

        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if (whole.is_empty() && fraction.is_empty()) || fraction.len() > 2 {
            return None;
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let dollars: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().ok()? * 10,
            _ => fraction.parse().ok()?,
        };
        let amount = dollars.checked_mul(100)?.checked_add(cents)?;
        Some(Self::from_cents(if negative { -amount } else { amount }))
    }

    /// Difference `self - other`, or `None` if it would be negative or overflow
    pub fn checked_change(&self, other: Price) -> Option<Price> {
        self.amount
            .checked_sub(other.amount)
            .filter(|diff| *diff >= 0)
            .map(Price::from_cents)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Drinks,
    Snacks,
    Chocolate,
}

impl Category {
    /// All categories, in declaration order
    pub const ALL: [Category; 3] = [Category::Drinks, Category::Snacks, Category::Chocolate];

    /// Localization key of the category display name
    pub fn key(&self) -> &'static str {
        match self {
            Category::Drinks => "drinks",
            Category::Snacks => "snacks",
            Category::Chocolate => "chocolate",
        }
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownCategory {
                name: s.to_string(),
            })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A product loaded into the machine
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Selection code the buyer types (e.g., "1")
    pub code: String,

    /// Localization key of the name (e.g., "orange_juice")
    pub name_key: String,

    /// Display name in the language active when the catalog was built
    pub name: String,

    /// Unit price
    pub price: Price,

    /// Category
    pub category: Category,

    /// Units left in the machine
    pub stock: u32,
}

impl Product {
    /// Create a new product
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        price: Price,
        category: Category,
        stock: u32,
    ) -> Self {
        let name = name.into();
        Self {
            code: code.into(),
            name_key: name.clone(),
            name,
            price,
            category,
            stock,
        }
    }

    /// Builder: set the localization key of the name
    pub fn with_name_key(mut self, key: impl Into<String>) -> Self {
        self.name_key = key.into();
        self
    }

    /// Check if at least one unit is left
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    fn reduce_stock(&mut self) -> bool {
        if self.stock == 0 {
            return false;
        }
        self.stock -= 1;
        true
    }
}

/// Ordered product catalog keyed by selection code
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Add a product, rejecting duplicate codes
    pub fn insert(&mut self, product: Product) -> Result<(), CatalogError> {
        if self.lookup(&product.code).is_some() {
            return Err(CatalogError::DuplicateCode { code: product.code });
        }
        self.products.push(product);
        Ok(())
    }

    /// Builder: add a product
    pub fn with_product(mut self, product: Product) -> Result<Self, CatalogError> {
        self.insert(product)?;
        Ok(self)
    }

    /// Find a product by code
    pub fn lookup(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    /// True iff the code exists and has stock
    pub fn is_available(&self, code: &str) -> bool {
        self.lookup(code).is_some_and(Product::is_available)
    }

    /// Remove one unit of stock.
    ///
    /// No-op on unknown codes and sold-out products. Returns whether a unit
    /// was actually removed.
    pub fn decrement_stock(&mut self, code: &str) -> bool {
        let Some(product) = self.products.iter_mut().find(|p| p.code == code) else {
            return false;
        };
        let removed = product.reduce_stock();
        if removed && product.stock == 0 {
            info!(code = %product.code, name = %product.name, "Product sold out");
        }
        removed
    }

    /// All products in insertion order
    pub fn entries(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Products grouped by category, categories in order of first appearance
    pub fn by_category(&self) -> Vec<(Category, Vec<&Product>)> {
        let mut groups: Vec<(Category, Vec<&Product>)> = Vec::new();
        for product in &self.products {
            match groups.iter_mut().find(|(c, _)| *c == product.category) {
                Some((_, items)) => items.push(product),
                None => groups.push((product.category, vec![product])),
            }
        }
        groups
    }

    /// Total units left across all products
    pub fn total_stock(&self) -> u32 {
        self.products.iter().map(|p| p.stock).sum()
    }

    /// Get number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new()
            .with_product(Product::new("1", "orange juice", Price::new(2.99), Category::Drinks, 1))
            .and_then(|c| {
                c.with_product(Product::new("6", "salty chips", Price::new(1.50), Category::Snacks, 0))
            })
            .and_then(|c| {
                c.with_product(Product::new("3", "water", Price::new(1.25), Category::Drinks, 5))
            })
            .unwrap()
    }

    #[test]
    fn test_price_conversion_and_display() {
        assert_eq!(Price::new(2.99).amount, 299);
        assert_eq!(Price::new(10.0).to_string(), "10.00");
        assert_eq!(Price::from_cents(1).to_string(), "0.01");
        assert_eq!(Price::from_cents(-150).to_string(), "-1.50");
    }

    #[test]
    fn test_price_parse() {
        assert_eq!(Price::parse("3.00"), Some(Price::from_cents(300)));
        assert_eq!(Price::parse(" 2 "), Some(Price::from_cents(200)));
        assert_eq!(Price::parse("abc"), None);
        assert_eq!(Price::parse(""), None);
        assert_eq!(Price::parse("NaN"), None);
        assert_eq!(Price::parse("inf"), None);
    }

    #[test]
    fn test_price_parse_is_exact() {
        assert_eq!(Price::parse(".5"), Some(Price::from_cents(50)));
        assert_eq!(Price::parse("2.5"), Some(Price::from_cents(250)));
        assert_eq!(Price::parse("+1.05"), Some(Price::from_cents(105)));
        assert_eq!(Price::parse("-2.50"), Some(Price::from_cents(-250)));
        assert_eq!(Price::parse("2.985"), None);
        assert_eq!(Price::parse("1e30"), None);
        assert_eq!(Price::parse("-1e30"), None);
        assert_eq!(Price::parse("99999999999999999999"), None);
        assert_eq!(Price::parse("."), None);
        assert_eq!(Price::parse("-"), None);
        assert_eq!(Price::parse("1.2.3"), None);
        assert_eq!(Price::parse("--1"), None);
    }

    #[test]
    fn test_checked_change() {
        let price = Price::new(2.99);
        assert_eq!(Price::new(3.00).checked_change(price), Some(Price::from_cents(1)));
        assert_eq!(price.checked_change(price), Some(Price::from_cents(0)));
        assert_eq!(Price::new(1.00).checked_change(price), None);
        assert_eq!(Price::from_cents(i64::MIN).checked_change(price), None);
        assert_eq!(price.checked_change(Price::from_cents(i64::MIN)), None);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("drinks".parse::<Category>().unwrap(), Category::Drinks);
        assert_eq!("Chocolate".parse::<Category>().unwrap(), Category::Chocolate);
        assert!("fruit".parse::<Category>().is_err());
    }

    #[test]
    fn test_lookup_and_availability() {
        let catalog = sample();
        assert_eq!(catalog.lookup("1").map(|p| p.name.as_str()), Some("orange juice"));
        assert!(catalog.lookup("99").is_none());
        assert!(catalog.is_available("1"));
        assert!(!catalog.is_available("6"));
        assert!(!catalog.is_available("99"));
    }

    #[test]
    fn test_decrement_never_goes_negative() {
        let mut catalog = sample();
        assert!(catalog.decrement_stock("1"));
        assert_eq!(catalog.lookup("1").unwrap().stock, 0);
        assert!(!catalog.decrement_stock("1"));
        assert_eq!(catalog.lookup("1").unwrap().stock, 0);
        assert!(!catalog.is_available("1"));
    }

    #[test]
    fn test_unknown_code_does_not_mutate() {
        let mut catalog = sample();
        let before = catalog.clone();
        assert!(!catalog.decrement_stock("42"));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let mut catalog = sample();
        let err = catalog
            .insert(Product::new("1", "dup", Price::new(1.0), Category::Snacks, 1))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCode { code } if code == "1"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let catalog = sample();
        let codes: Vec<_> = catalog.entries().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["1", "6", "3"]);
    }

    #[test]
    fn test_by_category_groups_in_first_appearance_order() {
        let catalog = sample();
        let groups = catalog.by_category();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Category::Drinks);
        let drinks: Vec<_> = groups[0].1.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(drinks, vec!["1", "3"]);
        assert_eq!(groups[1].0, Category::Snacks);
    }
}
