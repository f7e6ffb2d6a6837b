//! System startup, shutdown and observability setup.

pub mod blog_system;

pub use blog_system::BlogSystem;
pub use ledger_framework::tracing::setup_tracing;
