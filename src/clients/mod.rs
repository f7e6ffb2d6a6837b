//! Type-safe wrappers around [`ResourceClient`](ledger_framework::ResourceClient).

pub mod comment_client;
pub mod post_client;

pub use comment_client::*;
pub use post_client::*;
