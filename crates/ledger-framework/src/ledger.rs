//! # Ledger
//!
//! The account-store operations: create, read, update, delete and list, generic
//! over any [`AccountEntity`].
//!
//! Each call opens one [`Transaction`](crate::store::Transaction), runs
//! derivation, authorization and the entity hooks against it, and commits only if
//! every step succeeded. On any error the transaction is dropped and the store is
//! unchanged.
//!
//! ## Operations
//!
//! * **Create**: derive the address from `(NAMESPACE, scope, id)`, reject an
//!   occupied address, build the record, run `on_create`, allocate `SPACE` bytes.
//! * **Get**: decode the record at an address.
//! * **Update**: load, authorize, run `on_update`, re-encode into the same allocation.
//! * **Delete**: load, authorize, run `on_delete`, close the account.
//! * **List**: every record of a kind, optionally restricted to one scope.

use crate::address::{derive_address, Address, Derived, Identity, RecordId};
use crate::clock::Clock;
use crate::entity::{entity_type, AccountEntity};
use crate::error::LedgerError;
use crate::guard::authorize;
use crate::store::AccountStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns the account store and applies operations to it.
pub struct Ledger {
    store: AccountStore,
    program_id: Address,
    clock: Arc<dyn Clock>,
}

impl Ledger {
    pub fn new(program_id: Address, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: AccountStore::new(),
            program_id,
            clock,
        }
    }

    pub fn program_id(&self) -> &Address {
        &self.program_id
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    pub fn create<T: AccountEntity>(
        &mut self,
        actor: Identity,
        id: RecordId,
        params: T::Create,
    ) -> Result<Address, LedgerError> {
        let entity_type = entity_type::<T>();
        debug!(entity_type, %actor, ?params, "Create");
        let program_id = self.program_id;
        let now = self.clock.unix_timestamp();

        let scope = T::scope_for(&actor, &params);
        let Derived { address, bump } = derive_address(&program_id, T::NAMESPACE, &scope, &id)?;

        let mut tx = self.store.begin(program_id, now);
        let result = (|| {
            if tx.exists(&address) {
                return Err(LedgerError::AlreadyExists(address));
            }
            let mut record = T::from_create_params(actor, id, params, now)?;
            record.on_create(&address, &mut tx)?;
            tx.allocate(&address, &record)
        })();

        match result {
            Ok(()) => {
                tx.commit();
                info!(entity_type, %address, bump, size = self.store.len(), "Created");
                Ok(address)
            }
            Err(e) => {
                warn!(entity_type, %address, error = %e, "Create failed");
                Err(e)
            }
        }
    }

    pub fn get<T: AccountEntity>(&mut self, address: &Address) -> Result<T, LedgerError> {
        let tx = self.store.begin(self.program_id, self.clock.unix_timestamp());
        let result = tx.load::<T>(address);
        debug!(entity_type = entity_type::<T>(), %address, found = result.is_ok(), "Get");
        result
    }

    pub fn update<T: AccountEntity>(
        &mut self,
        actor: Identity,
        address: &Address,
        update: T::Update,
    ) -> Result<T, LedgerError> {
        let entity_type = entity_type::<T>();
        debug!(entity_type, %address, %actor, ?update, "Update");
        let program_id = self.program_id;
        let now = self.clock.unix_timestamp();

        let mut tx = self.store.begin(program_id, now);
        let result = (|| {
            let mut record = tx.load::<T>(address)?;
            authorize(&program_id, address, &record, &actor)?;
            let (owner, id, scope) = (*record.owner(), *record.id(), record.scope());
            record.on_update(update, now)?;
            if *record.owner() != owner || *record.id() != id || record.scope() != scope {
                return Err(LedgerError::InvariantViolation(format!(
                    "{entity_type} update changed its identity fields"
                )));
            }
            tx.store(address, &record)?;
            Ok(record)
        })();

        match result {
            Ok(record) => {
                tx.commit();
                info!(entity_type, %address, "Updated");
                Ok(record)
            }
            Err(e) => {
                warn!(entity_type, %address, error = %e, "Update failed");
                Err(e)
            }
        }
    }

    pub fn delete<T: AccountEntity>(
        &mut self,
        actor: Identity,
        address: &Address,
    ) -> Result<(), LedgerError> {
        let entity_type = entity_type::<T>();
        debug!(entity_type, %address, %actor, "Delete");
        let program_id = self.program_id;
        let now = self.clock.unix_timestamp();

        let mut tx = self.store.begin(program_id, now);
        let result = (|| {
            let record = tx.load::<T>(address)?;
            authorize(&program_id, address, &record, &actor)?;
            record.on_delete(address, &mut tx)?;
            tx.close(address)
        })();

        match result {
            Ok(()) => {
                tx.commit();
                info!(entity_type, %address, size = self.store.len(), "Deleted");
                Ok(())
            }
            Err(e) => {
                warn!(entity_type, %address, error = %e, "Delete failed");
                Err(e)
            }
        }
    }

    /// Records of kind `T`, restricted to `scope` when given.
    pub fn list<T: AccountEntity>(
        &mut self,
        scope: Option<Address>,
    ) -> Result<Vec<(Address, T)>, LedgerError> {
        let tx = self.store.begin(self.program_id, self.clock.unix_timestamp());
        let records: Vec<_> = tx
            .scan::<T>()?
            .into_iter()
            .filter(|(_, record)| scope.map_or(true, |scope| record.scope() == scope))
            .collect();
        debug!(entity_type = entity_type::<T>(), ?scope, count = records.len(), "List");
        Ok(records)
    }
}
