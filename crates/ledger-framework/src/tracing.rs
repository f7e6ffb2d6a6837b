//! # Observability & Tracing
//!
//! Structured logging for the ledger. Every operation logs through `tracing` with
//! the record kind in an `entity_type` field:
//!
//! - **Actor Lifecycle**: `Actor started` and `Shutdown` with the final store size
//! - **Operations**: `Created`, `Updated`, `Deleted` at info, `Get`/`List` and payloads at debug
//! - **Rejections**: `Create failed`, `Update failed`, `Delete failed` and guard failures at warn
//! - **Store internals**: allocations, closes and commits at trace
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run
//! RUST_LOG=ledger_framework=trace cargo run
//! ```
//!
//! With `RUST_LOG=info` a post and one comment look like:
//!
//! ```text
//! INFO Actor started program_id=7a1c…
//! INFO Created entity_type="Post" address=3f9e… bump=254 size=1
//! INFO Created entity_type="Comment" address=b04d… bump=255 size=2
//! ```

/// Initializes the global subscriber, filtered by `RUST_LOG`.
///
/// Call once, at program start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
