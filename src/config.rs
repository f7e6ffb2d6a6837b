//! Ledger Configuration
//!
//! The program id every address is derived under, and the capacity of the
//! channel into the ledger actor. Values come from serde (with per-field
//! defaults) or from the environment:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `BLOG_LEDGER_PROGRAM_ID` | `program_id` (64 hex chars) | [`DEFAULT_PROGRAM_ID`] |
//! | `BLOG_LEDGER_CHANNEL_CAPACITY` | `channel_capacity` | 32 |

use crate::error::BlogError;
use ledger_framework::Address;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

pub const PROGRAM_ID_VAR: &str = "BLOG_LEDGER_PROGRAM_ID";
pub const CHANNEL_CAPACITY_VAR: &str = "BLOG_LEDGER_CHANNEL_CAPACITY";

/// Program id used when none is configured.
pub const DEFAULT_PROGRAM_ID: Address = Address::new_from_array([
    0xc4, 0xd8, 0xb4, 0xf3, 0x15, 0x60, 0x96, 0x41,
    0x60, 0xfa, 0x82, 0xd5, 0xc3, 0x21, 0xc1, 0xda,
    0x6a, 0xf0, 0xc6, 0x65, 0x99, 0x69, 0x12, 0x68,
    0x7a, 0x29, 0xdb, 0x9a, 0xeb, 0x2e, 0x2b, 0x2c,
]);

/// Ledger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Derivation domain for every record address
    #[serde(default = "default_program_id")]
    pub program_id: Address,

    /// Requests that may queue before callers wait (default: 32, never 0)
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: NonZeroUsize,
}

fn default_program_id() -> Address {
    DEFAULT_PROGRAM_ID
}

fn default_channel_capacity() -> NonZeroUsize {
    NonZeroUsize::new(32).unwrap_or(NonZeroUsize::MIN)
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            program_id: default_program_id(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl LedgerConfig {
    /// Create a config with the given program id and default capacity
    pub fn with_program_id(program_id: Address) -> Self {
        Self {
            program_id,
            ..Default::default()
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, BlogError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BlogError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(PROGRAM_ID_VAR) {
            config.program_id = raw
                .trim()
                .parse()
                .map_err(|e| BlogError::Config(format!("{PROGRAM_ID_VAR}: {e}")))?;
        }
        if let Some(raw) = lookup(CHANNEL_CAPACITY_VAR) {
            config.channel_capacity = raw
                .trim()
                .parse()
                .map_err(|e| BlogError::Config(format!("{CHANNEL_CAPACITY_VAR}: {e}")))?;
        }
        Ok(config)
    }
}
