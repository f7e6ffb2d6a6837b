//! Comment-specific ledger logic and the Relation Maintainer that keeps each
//! post's comment counter in step with its live comments.

pub mod entity;
pub mod relation;
