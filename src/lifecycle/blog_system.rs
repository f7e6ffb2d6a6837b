use crate::clients::{CommentClient, PostClient};
use crate::config::LedgerConfig;
use crate::error::BlogError;
use ledger_framework::{Address, Clock, LedgerActor, SystemClock};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime that owns the ledger actor and hands out the blog clients.
///
/// `BlogSystem` is responsible for:
/// - **Lifecycle Management**: Starting the ledger actor and stopping it cleanly
/// - **Wiring**: Giving the Post and Comment clients one shared connection, so a
///   comment and its post's counter are always written by the same actor
///
/// # Example
///
/// ```ignore
/// let system = BlogSystem::new(LedgerConfig::from_env()?);
///
/// let post = system.post_client.create_post(me, RecordId::random(), PostCreate::new("Hi", "...")).await?;
/// system.comment_client.add_comment(me, post, RecordId::random(), "First!".into()).await?;
///
/// system.shutdown().await?;
/// ```
pub struct BlogSystem {
    pub post_client: PostClient,
    pub comment_client: CommentClient,
    program_id: Address,
    handle: tokio::task::JoinHandle<()>,
}

impl BlogSystem {
    /// Starts a ledger with wall-clock timestamps. Must be called within a Tokio runtime.
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Starts a ledger that stamps records with `clock`.
    pub fn with_clock(config: LedgerConfig, clock: Arc<dyn Clock>) -> Self {
        let (actor, connection) =
            LedgerActor::new(config.channel_capacity.get(), config.program_id, clock);
        let handle = tokio::spawn(actor.run());
        info!(program_id = %config.program_id, "Blog system started");

        Self {
            post_client: PostClient::new(connection.client()),
            comment_client: CommentClient::new(connection.client()),
            program_id: config.program_id,
            handle,
        }
    }

    pub fn program_id(&self) -> &Address {
        &self.program_id
    }

    /// Drops both clients, which closes the channel, then waits for the actor to
    /// drain and exit.
    ///
    /// Clones of the clients held elsewhere keep the actor alive; shutdown waits
    /// for them too.
    pub async fn shutdown(self) -> Result<(), BlogError> {
        info!("Shutting down system...");

        drop(self.post_client);
        drop(self.comment_client);

        if let Err(e) = self.handle.await {
            error!("Ledger task failed: {:?}", e);
            return Err(BlogError::Shutdown(e.to_string()));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
