//! Pure data structures (DTOs) implementing the [`AccountEntity`](ledger_framework::AccountEntity) trait.

pub mod comment;
pub mod post;

pub use comment::*;
pub use post::*;
