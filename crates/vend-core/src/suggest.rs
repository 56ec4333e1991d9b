//! # Add-on Suggestions
//!
//! Maps the category of a purchased product to product names worth offering
//! next, then keeps the ones the machine can still sell.

use crate::product::{Catalog, Category, Product};
use std::collections::HashMap;

/// Category to suggested display names, fixed once the catalog is built
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    by_category: HashMap<Category, Vec<String>>,
}

impl SuggestionEngine {
    /// Create an engine with no suggestions
    pub fn new() -> Self {
        Self {
            by_category: HashMap::new(),
        }
    }

    /// Builder: set the suggested display names for a category
    pub fn with_suggestions<I, S>(mut self, category: Category, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.by_category
            .insert(category, names.into_iter().map(Into::into).collect());
        self
    }

    /// Suggested names for a category (empty if none configured)
    pub fn names_for(&self, category: Category) -> &[String] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Available products to offer after buying `purchased`.
    ///
    /// Results follow catalog order, not the order of the suggestion list.
    /// The purchased product itself and sold-out products are never returned.
    pub fn suggestions_for<'a>(&self, catalog: &'a Catalog, purchased: &Product) -> Vec<&'a Product> {
        let names = self.names_for(purchased.category);
        if names.is_empty() {
            return Vec::new();
        }

        catalog
            .entries()
            .filter(|p| p.code != purchased.code)
            .filter(|p| p.is_available())
            .filter(|p| names.iter().any(|n| *n == p.name))
            .collect()
    }
}
