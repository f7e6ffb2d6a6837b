//! # Blog Ledger
//!
//! Posts and comments stored as fixed-size records at deterministic addresses,
//! mutated only by their owners, with each post's comment counter kept exactly
//! in step with its live comments.
//!
//! ## Core Components
//!
//! - **[model]**: Pure data structures ([`Post`](model::Post), [`Comment`](model::Comment)) and their byte budgets.
//! - **[post_account]** / **[comment_account]**: The [`AccountEntity`](ledger_framework::AccountEntity)
//!   implementations: record layouts, field checks and the lifecycle hooks.
//! - **[comment_account::relation]**: The Relation Maintainer behind `comment_count`.
//! - **[clients]**: Type-safe wrappers ([`PostClient`](clients::PostClient), [`CommentClient`](clients::CommentClient)).
//! - **[lifecycle]**: [`BlogSystem`](lifecycle::BlogSystem), which starts and stops the ledger actor.
//! - **[config]** / **[error]**: [`LedgerConfig`](config::LedgerConfig) and [`BlogError`](error::BlogError).
//!
//! The generic engine (address derivation, codec, transactions, the actor) lives in
//! the `ledger-framework` crate.
//!
//! ## Consistency Model
//!
//! One `LedgerActor` serves every record kind and applies one request at a time.
//! Each request runs in a single transaction, and hooks write through that same
//! transaction, so:
//!
//! - adding a comment and incrementing its post's counter commit together;
//! - deleting a comment and decrementing the counter commit together;
//! - deleting a post closes all of its comments in the same step.
//!
//! Any failure leaves every record as it was.
//!
//! ## Testing
//!
//! See [`ledger_framework::mock`] for testing clients without an actor, and the
//! `tests/` directory for full-system scenarios.

pub mod clients;
pub mod comment_account;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod post_account;
