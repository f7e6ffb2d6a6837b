//! # Ledger Errors
//!
//! This module defines the error taxonomy shared by every layer of the ledger:
//! the address deriver, the record codec, the account store and its clients.
//!
//! Every error is surfaced synchronously to the caller of the operation that
//! produced it. Nothing is retried inside the ledger.

use crate::address::{Address, Identity};

/// Errors that can occur while deriving, encoding, storing or mutating accounts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A create targeted an address that already holds a live record.
    #[error("Account already exists: {0}")]
    AlreadyExists(Address),

    /// The target record (or the parent a child record needs) does not exist.
    #[error("Account not found: {0}")]
    NotFound(Address),

    /// The actor is not the record owner, or the address does not re-derive from the record.
    #[error("Unauthorized: {actor} may not modify {address} ({reason})")]
    Unauthorized {
        actor: Identity,
        address: Address,
        reason: &'static str,
    },

    /// A field or a whole record does not fit its byte budget.
    #[error("{field} exceeds its budget: {len} > {max} bytes")]
    Overflow {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Stored bytes do not decode to a well-formed record.
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    /// An internal invariant would be broken. Indicates a bug upstream.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Ledger actor closed")]
    ActorClosed,

    #[error("Ledger actor dropped response channel")]
    ActorDropped,
}

impl LedgerError {
    /// Shorthand for [`LedgerError::Overflow`].
    pub fn overflow(field: &'static str, len: usize, max: usize) -> Self {
        LedgerError::Overflow { field, len, max }
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        LedgerError::CorruptRecord(msg.into())
    }
}
