//! # Kiosk Errors
//!
//! Errors that can stop a session. Buyer mistakes are not here: they are
//! [`InputError`](vend_core::InputError)s and are handled by re-prompting.

use thiserror::Error;
use vend_core::{CatalogError, I18nError};

/// Session-level error
#[derive(Debug, Error)]
pub enum KioskError {
    /// Message template and caller disagree (a defect, not a buyer error)
    #[error(transparent)]
    Localization(#[from] I18nError),

    /// Catalog could not be (re)built
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Terminal read/write failed
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input channel reached end-of-file
    #[error("Input closed")]
    InputClosed,

    /// A validated code vanished from the catalog
    #[error("Product not found: {code}")]
    ProductNotFound { code: String },
}

/// Result type alias for session operations
pub type KioskResult<T> = Result<T, KioskError>;
