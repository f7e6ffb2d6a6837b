//! # AccountEntity Trait
//!
//! The `AccountEntity` trait defines the contract that every record kind (Post,
//! Comment, …) must implement to be stored by the [`Ledger`](crate::Ledger). It fixes
//! the kind's namespace and byte budget, names its create/update payloads, and
//! provides lifecycle hooks that run inside the operation's transaction.
//!
//! # Provided Methods (Hooks)
//! - [`AccountEntity::on_create`]
//! - [`AccountEntity::on_delete`]
//!
//! Both default to doing nothing. Override them when creating or deleting a record
//! must touch other records; whatever the hook writes commits or rolls back
//! together with the record itself.

use crate::address::{Address, Identity, Namespace, RecordId};
use crate::codec::{RecordReader, RecordWriter};
use crate::error::LedgerError;
use crate::store::Transaction;
use std::fmt::Debug;

/// Trait that any record kind must implement to be managed by the ledger.
pub trait AccountEntity: Clone + Debug + Send + Sync + 'static {
    /// Name hashed into the record discriminator.
    const ACCOUNT_NAME: &'static str;

    /// Derivation namespace for addresses of this kind.
    const NAMESPACE: Namespace;

    /// Total byte budget of one record, reserved in full at creation.
    const SPACE: usize;

    /// The data required to create a new record.
    type Create: Send + Debug + 'static;

    /// The data required to update an existing record.
    type Update: Send + Debug + 'static;

    fn owner(&self) -> &Identity;

    fn id(&self) -> &RecordId;

    /// The seed that scopes [`id`](Self::id) during address derivation.
    fn scope(&self) -> Address;

    /// The scope a record created by `actor` from `params` will have.
    fn scope_for(actor: &Identity, params: &Self::Create) -> Address;

    /// Construct the full record. Field budgets are checked here, before any write.
    fn from_create_params(
        owner: Identity,
        id: RecordId,
        params: Self::Create,
        now: i64,
    ) -> Result<Self, LedgerError>;

    // --- Lifecycle Hooks ---

    /// Called after the record is built and before it is allocated.
    fn on_create(
        &mut self,
        _address: &Address,
        _tx: &mut Transaction<'_>,
    ) -> Result<(), LedgerError> {
        Ok(())
    }

    /// Apply an update. Owner, id and creation time must not change.
    fn on_update(&mut self, update: Self::Update, now: i64) -> Result<(), LedgerError>;

    /// Called before the record is closed.
    fn on_delete(&self, _address: &Address, _tx: &mut Transaction<'_>) -> Result<(), LedgerError> {
        Ok(())
    }

    // --- Layout ---

    /// Write every field after the discriminator.
    fn encode(&self, writer: &mut RecordWriter) -> Result<(), LedgerError>;

    /// Read the fields back in the order `encode` wrote them.
    fn decode(reader: &mut RecordReader<'_>) -> Result<Self, LedgerError>;
}

/// Short type name for log fields, e.g. `Post` instead of `blog_ledger::model::post::Post`.
pub fn entity_type<T: AccountEntity>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}
