//! # Catalog Configuration
//!
//! The machine's product line-up and suggestion map, either built in or
//! loaded from a TOML file such as `config/catalog.toml`.
//!
//! Names are localization keys. [`CatalogConfig::build`] resolves them in the
//! active language, so rebuilding after a language switch gives a fresh
//! catalog with every product back at its starting stock.

use crate::error::CatalogError;
use crate::i18n::Localizer;
use crate::product::{Catalog, Category, Price, Product};
use crate::suggest::SuggestionEngine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Starting stock for products that do not set their own
pub const DEFAULT_STOCK: u32 = 5;

fn default_stock() -> u32 {
    DEFAULT_STOCK
}

/// One product line in the configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    /// Selection code
    pub code: String,

    /// Localization key of the display name
    pub name: String,

    /// Decimal price (e.g., 2.99)
    pub price: f64,

    /// Category
    pub category: Category,

    /// Starting stock, falls back to `default_stock`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl ProductEntry {
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: f64, category: Category) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            price,
            category,
            stock: None,
        }
    }

    /// Builder: set starting stock
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }
}

/// Full machine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Starting stock for entries without an explicit `stock`
    #[serde(default = "default_stock")]
    pub default_stock: u32,

    /// Products in menu order
    #[serde(default)]
    pub products: Vec<ProductEntry>,

    /// Category name to suggested product name keys
    #[serde(default)]
    pub suggestions: BTreeMap<String, Vec<String>>,
}

impl Default for CatalogConfig {
    /// The stock line-up of Luna's Vending Machine
    fn default() -> Self {
        let products = vec![
            ProductEntry::new("1", "orange_juice", 2.99, Category::Drinks),
            ProductEntry::new("2", "apple_juice", 2.99, Category::Drinks),
            ProductEntry::new("6", "salty_chips", 1.50, Category::Snacks),
            ProductEntry::new("7", "takkis", 1.50, Category::Snacks),
            ProductEntry::new("9", "kitkat", 2.50, Category::Chocolate),
            ProductEntry::new("3", "water", 1.25, Category::Drinks),
            ProductEntry::new("4", "professor_peppy", 5.75, Category::Drinks),
            ProductEntry::new("10", "chocolate_bar", 2.75, Category::Chocolate),
            ProductEntry::new("8", "cookies", 1.75, Category::Snacks),
            ProductEntry::new("5", "dr_pepper", 10.0, Category::Drinks),
        ];

        let suggestions = BTreeMap::from([
            (
                "drinks".to_string(),
                vec!["cookies".to_string(), "chocolate_bar".to_string()],
            ),
            (
                "snacks".to_string(),
                vec!["water".to_string(), "orange_juice".to_string()],
            ),
            (
                "chocolate".to_string(),
                vec!["apple_juice".to_string(), "dr_pepper".to_string()],
            ),
        ]);

        Self {
            default_stock: DEFAULT_STOCK,
            products,
            suggestions,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Builder: override the default starting stock
    pub fn with_default_stock(mut self, stock: u32) -> Self {
        self.default_stock = stock;
        self
    }

    /// Build a fresh catalog and suggestion engine in the localizer's language.
    ///
    /// Every product starts at its configured stock.
    pub fn build(&self, localizer: &Localizer) -> Result<(Catalog, SuggestionEngine), CatalogError> {
        let mut catalog = Catalog::new();
        for entry in &self.products {
            if !entry.price.is_finite() || entry.price < 0.0 || entry.price * 100.0 >= i64::MAX as f64 {
                return Err(CatalogError::InvalidPrice {
                    code: entry.code.clone(),
                    price: entry.price,
                });
            }
            let product = Product::new(
                entry.code.clone(),
                localizer.text(&entry.name),
                Price::new(entry.price),
                entry.category,
                entry.stock.unwrap_or(self.default_stock),
            )
            .with_name_key(entry.name.clone());
            catalog.insert(product)?;
        }

        let mut engine = SuggestionEngine::new();
        for (category, keys) in &self.suggestions {
            let category: Category = category.parse()?;
            engine = engine.with_suggestions(category, keys.iter().map(|k| localizer.text(k)));
        }

        Ok((catalog, engine))
    }
}
