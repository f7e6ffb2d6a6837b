//! Error types for the blog application.

use ledger_framework::LedgerError;
use thiserror::Error;

/// Errors surfaced by the blog clients and the system lifecycle.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BlogError {
    /// The ledger rejected the operation. Nothing was written.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A configuration value could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The ledger task ended abnormally.
    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}

impl BlogError {
    /// The underlying ledger error, if this is one.
    pub fn ledger(&self) -> Option<&LedgerError> {
        match self {
            BlogError::Ledger(e) => Some(e),
            _ => None,
        }
    }
}
