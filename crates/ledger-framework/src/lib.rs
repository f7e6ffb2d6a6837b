//! # Ledger Framework
//!
//! This crate provides the building blocks for an account-based record store:
//! records live at deterministic addresses derived from their seeds, are encoded
//! into fixed byte budgets, and are mutated only by their owner, one operation at
//! a time, through a single actor.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into layers:
//!
//! 1. **Address Layer** ([`address`]) - Program-derived addresses and identities
//! 2. **Entity Layer** ([`AccountEntity`]) - Record kinds, their layout and hooks
//! 3. **Storage Layer** ([`store`], [`codec`]) - Byte-exact records and transactions
//! 4. **Ledger Layer** ([`Ledger`], [`guard`]) - Derivation, authorization, commit
//! 5. **Runtime Layer** ([`LedgerActor`]) - Sequential message processing
//! 6. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - Type-safe async access
//!
//! You describe a record kind once by implementing [`AccountEntity`]; the ledger
//! handles address derivation, budgets, ownership checks and atomic commits.
//!
//! ## Defining a Record Kind
//!
//! ```rust
//! use ledger_framework::codec::{RecordReader, RecordWriter};
//! use ledger_framework::{AccountEntity, Address, Identity, LedgerError, Namespace, RecordId};
//!
//! const NAME_BUDGET: usize = 32;
//!
//! #[derive(Clone, Debug)]
//! struct Profile {
//!     owner: Identity,
//!     id: RecordId,
//!     name: String,
//! }
//!
//! impl AccountEntity for Profile {
//!     const ACCOUNT_NAME: &'static str = "Profile";
//!     const NAMESPACE: Namespace = Namespace::new("profile");
//!     const SPACE: usize = 8 + 32 + 32 + 4 + NAME_BUDGET;
//!
//!     type Create = String;
//!     type Update = String;
//!
//!     fn owner(&self) -> &Identity { &self.owner }
//!     fn id(&self) -> &RecordId { &self.id }
//!     fn scope(&self) -> Address { self.owner.as_address() }
//!     fn scope_for(actor: &Identity, _: &String) -> Address { actor.as_address() }
//!
//!     fn from_create_params(owner: Identity, id: RecordId, name: String, _now: i64) -> Result<Self, LedgerError> {
//!         Ok(Self { owner, id, name })
//!     }
//!
//!     fn on_update(&mut self, name: String, _now: i64) -> Result<(), LedgerError> {
//!         self.name = name;
//!         Ok(())
//!     }
//!
//!     fn encode(&self, writer: &mut RecordWriter) -> Result<(), LedgerError> {
//!         writer.put_identity(&self.owner);
//!         writer.put_record_id(&self.id);
//!         writer.put_str("name", &self.name, NAME_BUDGET)
//!     }
//!
//!     fn decode(reader: &mut RecordReader<'_>) -> Result<Self, LedgerError> {
//!         Ok(Self {
//!             owner: reader.get_identity()?,
//!             id: reader.get_record_id()?,
//!             name: reader.get_str("name", NAME_BUDGET)?,
//!         })
//!     }
//! }
//! ```
//!
//! ## Running the Actor
//!
//! ```rust,ignore
//! let (actor, connection) = LedgerActor::new(32, program_id, Arc::new(SystemClock));
//! tokio::spawn(actor.run());
//!
//! let profiles = connection.client::<Profile>();
//! let address = profiles.create(me, RecordId::random(), "Ada".into()).await?;
//! let profile = profiles.get(address).await?;
//! ```
//!
//! ## Testing
//!
//! - Unit-test record kinds against a [`Ledger`] directly with a [`ManualClock`].
//! - Test code around clients with [`mock::MockClient`].
//! - Integration-test the full actor under `tests/`.

pub mod actor;
pub mod address;
pub mod client;
pub mod client_trait;
pub mod clock;
pub mod codec;
pub mod entity;
pub mod error;
pub mod guard;
pub mod ledger;
pub mod message;
pub mod mock;
pub mod store;
pub mod tracing;

#[cfg(test)]
mod testing;

// Re-export core types for convenience
pub use actor::{Connection, LedgerActor};
pub use address::{Address, Derived, Identity, Keypair, Namespace, RecordId};
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::AccountEntity;
pub use error::LedgerError;
pub use ledger::Ledger;
pub use message::{Dispatch, ResourceRequest, Response};
pub use store::Transaction;
