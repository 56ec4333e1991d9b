//! # vend-core
//!
//! Core types for the vend-kiosk vending machine. No terminal I/O lives here.
//!
//! This crate provides:
//! - `Product`, `Price` and `Catalog` for the machine's inventory
//! - `LocalizationTable` and `Localizer` for English/Arabic messages
//! - `SuggestionEngine` for add-on offers
//! - `CatalogConfig` for the built-in or TOML-loaded line-up
//! - `Sale` records of completed purchases
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vend_core::{CatalogConfig, Language, LocalizationTable, Localizer};
//!
//! let localizer = Localizer::new(Arc::new(LocalizationTable::builtin()), Language::English);
//! let (mut catalog, suggestions) = CatalogConfig::default().build(&localizer)?;
//!
//! let juice = catalog.lookup("1").cloned().unwrap();
//! catalog.decrement_stock("1");
//! let offers = suggestions.suggestions_for(&catalog, &juice);
//! ```

pub mod config;
pub mod error;
pub mod i18n;
pub mod product;
pub mod sale;
pub mod suggest;

// Re-exports for convenience
pub use config::{CatalogConfig, ProductEntry, DEFAULT_STOCK};
pub use error::{CatalogError, I18nError, I18nResult, InputError};
pub use i18n::{parse_yes_no, Language, LocalizationTable, Localizer};
pub use product::{Catalog, Category, Price, Product};
pub use sale::{revenue, Sale};
pub use suggest::SuggestionEngine;
