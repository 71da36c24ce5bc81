//! Error types for the Ledger.

use emission_ledger_core::{CoreError, ValidationError};
use emission_ledger_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A document did not conform to its schema.
    #[error("schema validation failed: {0}")]
    SchemaValidation(#[from] ValidationError),

    /// A category kind other than hub or transport was requested.
    #[error("invalid category kind {0:?}: expected \"hub\" or \"transport\"")]
    InvalidCategoryKind(String),

    /// A document could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Repository error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<CoreError> for LedgerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => LedgerError::SchemaValidation(e),
            CoreError::InvalidCategoryKind(kind) => LedgerError::InvalidCategoryKind(kind),
            CoreError::Encoding(msg) => LedgerError::Encoding(msg),
        }
    }
}

impl LedgerError {
    pub fn is_schema_error(&self) -> bool {
        matches!(self, LedgerError::SchemaValidation(_))
    }

    pub fn is_invalid_category(&self) -> bool {
        matches!(self, LedgerError::InvalidCategoryKind(_))
    }

    /// The repository could not be reached in time.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, LedgerError::Store(e) if e.is_unavailable())
    }
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
