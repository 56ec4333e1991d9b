//! # Kiosk Error Types
//!
//! Typed error handling for the vending kiosk.
//!
//! Two families live here:
//! - configuration/defect errors (`I18nError`, `CatalogError`) that callers propagate
//! - buyer input errors (`InputError`) that are always recovered by re-prompting

use crate::product::Price;
use thiserror::Error;

/// Errors raised by the localization layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum I18nError {
    /// A template references a placeholder the caller did not supply.
    /// This is a template/caller mismatch and never a buyer error.
    #[error("Template '{key}' references unknown placeholder '{placeholder}'")]
    Format { key: String, placeholder: String },

    /// Language tag outside the supported set
    #[error("Unsupported language: {tag}")]
    UnsupportedLanguage { tag: String },
}

/// Result type alias for localization operations
pub type I18nResult<T> = Result<T, I18nError>;

/// Errors raised while building a catalog from configuration
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two products share the same selection code
    #[error("Duplicate product code: {code}")]
    DuplicateCode { code: String },

    /// Price is negative or not a finite number
    #[error("Invalid price for product {code}: {price}")]
    InvalidPrice { code: String, price: f64 },

    /// Category name outside the supported set
    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },

    /// Catalog file could not be parsed
    #[error("Catalog parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A display name or category could not be localized
    #[error(transparent)]
    Localization(#[from] I18nError),
}

/// Recoverable buyer input errors.
///
/// None of these end a session. The controller renders the localized
/// message and asks again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Code does not exist in the catalog (includes non-numeric input)
    #[error("Invalid selection: {input}")]
    InvalidSelection { input: String },

    /// Code exists but stock is zero
    #[error("{product} is sold out")]
    SoldOut { product: String },

    /// Payment is not a number
    #[error("Malformed amount: {input}")]
    MalformedAmount { input: String },

    /// Payment parsed but is below the price
    #[error("Insufficient payment, at least {required} required")]
    InsufficientPayment { required: Price },

    /// Response is not a yes/no token in any supported language
    #[error("Invalid yes/no answer: {input}")]
    InvalidYesNo { input: String },
}

impl InputError {
    /// Localization key of the message shown to the buyer
    pub fn message_key(&self) -> &'static str {
        match self {
            InputError::InvalidSelection { .. } => "invalid_choice",
            InputError::SoldOut { .. } => "sold_out",
            InputError::MalformedAmount { .. } => "invalid_amount",
            InputError::InsufficientPayment { .. } => "insufficient_payment",
            InputError::InvalidYesNo { .. } => "invalid_yes_no",
        }
    }

    /// Placeholder values for the message template
    pub fn substitutions(&self) -> Vec<(&'static str, String)> {
        match self {
            InputError::SoldOut { product } => vec![("product", product.clone())],
            InputError::InsufficientPayment { required } => {
                vec![("amount", required.to_string())]
            }
            _ => Vec::new(),
        }
    }
}
