//! Post-specific ledger logic: the record layout, field budgets and the delete
//! cascade over the post's comments.

pub mod entity;
