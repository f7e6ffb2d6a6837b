//! # Ledger Actor
//!
//! This module defines the `LedgerActor`, the single writer that owns the
//! [`Ledger`]. It implements the "Server" side of the Actor Model: requests are
//! processed one at a time, so no two operations ever interleave and every
//! multi-record change (a comment and its post's counter) is applied as a unit.

use crate::address::Address;
use crate::client::ResourceClient;
use crate::clock::Clock;
use crate::entity::AccountEntity;
use crate::ledger::Ledger;
use crate::message::Dispatch;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// The actor that owns the account store for one program id.
///
/// **Concurrency Model**:
/// Clients for every record kind share one channel into this actor, and the run
/// loop handles one request at a time. Exclusive ownership of the ledger inside
/// the task replaces any locking.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `LedgerActor::new()` to get the `actor` and a [`Connection`].
/// 2.  **Run**: Spawn `actor.run()` in a background task.
/// 3.  **Use**: Get a typed client per record kind with [`Connection::client`].
///
/// The loop ends when every `Connection` and client has been dropped.
pub struct LedgerActor {
    receiver: mpsc::Receiver<Box<dyn Dispatch>>,
    ledger: Ledger,
}

impl LedgerActor {
    /// Creates the actor and the connection used to reach it.
    ///
    /// `buffer_size` is the channel capacity. When it is full, callers wait.
    ///
    /// # Panics
    ///
    /// Panics if `buffer_size` is 0.
    pub fn new(
        buffer_size: usize,
        program_id: Address,
        clock: Arc<dyn Clock>,
    ) -> (Self, Connection) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            ledger: Ledger::new(program_id, clock),
        };
        (actor, Connection { sender, program_id })
    }

    /// Runs the event loop, processing requests until the channel closes.
    pub async fn run(mut self) {
        let program_id = *self.ledger.program_id();
        info!(%program_id, "Actor started");

        while let Some(request) = self.receiver.recv().await {
            request.dispatch(&mut self.ledger);
        }

        info!(%program_id, size = self.ledger.store().len(), "Shutdown");
    }
}

/// Cloneable handle to a running [`LedgerActor`].
#[derive(Clone)]
pub struct Connection {
    sender: mpsc::Sender<Box<dyn Dispatch>>,
    program_id: Address,
}

impl Connection {
    pub fn program_id(&self) -> &Address {
        &self.program_id
    }

    /// A typed client for records of kind `T`.
    pub fn client<T: AccountEntity>(&self) -> ResourceClient<T> {
        ResourceClient::new(self.sender.clone(), self.program_id)
    }
}
