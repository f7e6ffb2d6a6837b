//! # Account Store
//!
//! Raw storage for encoded records and the [`Transaction`] overlay every
//! operation runs in.
//!
//! A transaction stages writes in its own map and only touches the store on
//! [`Transaction::commit`]. Dropping it discards everything it staged, which is
//! how a failed operation leaves all records exactly as they were.

use crate::address::Address;
use crate::codec::{decode_record, encode_record, is_kind};
use crate::entity::{entity_type, AccountEntity};
use crate::error::LedgerError;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Address-ordered map of allocated records.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: BTreeMap<Address, Vec<u8>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.accounts.contains_key(address)
    }

    /// The raw bytes stored at `address`.
    pub fn raw(&self, address: &Address) -> Option<&[u8]> {
        self.accounts.get(address).map(Vec::as_slice)
    }

    /// Opens a transaction stamped with `now`.
    pub fn begin(&mut self, program_id: Address, now: i64) -> Transaction<'_> {
        Transaction {
            store: self,
            staged: BTreeMap::new(),
            program_id,
            now,
        }
    }

    #[cfg(test)]
    pub(crate) fn put_raw(&mut self, address: Address, data: Vec<u8>) {
        self.accounts.insert(address, data);
    }
}

/// A set of staged writes against an [`AccountStore`].
///
/// `None` in `staged` marks an account closed by this transaction.
#[derive(Debug)]
pub struct Transaction<'a> {
    store: &'a mut AccountStore,
    staged: BTreeMap<Address, Option<Vec<u8>>>,
    program_id: Address,
    now: i64,
}

impl<'a> Transaction<'a> {
    pub fn program_id(&self) -> &Address {
        &self.program_id
    }

    /// Unix timestamp shared by every write in this transaction.
    pub fn now(&self) -> i64 {
        self.now
    }

    fn raw(&self, address: &Address) -> Option<&[u8]> {
        match self.staged.get(address) {
            Some(staged) => staged.as_deref(),
            None => self.store.raw(address),
        }
    }

    pub fn exists(&self, address: &Address) -> bool {
        self.raw(address).is_some()
    }

    /// Loads the record of kind `T` at `address`.
    ///
    /// An account of another kind at that address counts as absent.
    pub fn load<T: AccountEntity>(&self, address: &Address) -> Result<T, LedgerError> {
        let data = self.raw(address).ok_or(LedgerError::NotFound(*address))?;
        if !is_kind::<T>(data) {
            debug!(entity_type = entity_type::<T>(), %address, "Account holds another kind");
            return Err(LedgerError::NotFound(*address));
        }
        decode_record(data)
    }

    /// Allocates `T::SPACE` bytes at a free `address` and writes `record`.
    pub fn allocate<T: AccountEntity>(
        &mut self,
        address: &Address,
        record: &T,
    ) -> Result<(), LedgerError> {
        if self.exists(address) {
            return Err(LedgerError::AlreadyExists(*address));
        }
        let data = encode_record(record)?;
        trace!(entity_type = entity_type::<T>(), %address, len = data.len(), "Allocate");
        self.staged.insert(*address, Some(data));
        Ok(())
    }

    /// Re-encodes `record` into the existing allocation at `address`.
    pub fn store<T: AccountEntity>(
        &mut self,
        address: &Address,
        record: &T,
    ) -> Result<(), LedgerError> {
        let allocated = self
            .raw(address)
            .map(<[u8]>::len)
            .ok_or(LedgerError::NotFound(*address))?;
        let data = encode_record(record)?;
        if data.len() != allocated {
            return Err(LedgerError::overflow("record", data.len(), allocated));
        }
        trace!(entity_type = entity_type::<T>(), %address, "Store");
        self.staged.insert(*address, Some(data));
        Ok(())
    }

    /// Closes the account at `address`, reclaiming its storage.
    pub fn close(&mut self, address: &Address) -> Result<(), LedgerError> {
        if !self.exists(address) {
            return Err(LedgerError::NotFound(*address));
        }
        trace!(%address, "Close");
        self.staged.insert(*address, None);
        Ok(())
    }

    /// Every live record of kind `T`, in address order.
    ///
    /// Linear in the store: every record of kind `T` is decoded. Scoped listing
    /// and thread closing both go through here.
    pub fn scan<T: AccountEntity>(&self) -> Result<Vec<(Address, T)>, LedgerError> {
        let base = self
            .store
            .accounts
            .iter()
            .filter(|(address, _)| !self.staged.contains_key(*address))
            .map(|(address, data)| (address, data.as_slice()));
        let staged = self
            .staged
            .iter()
            .filter_map(|(address, data)| data.as_deref().map(|data| (address, data)));

        let mut records = base
            .chain(staged)
            .filter(|(_, data)| is_kind::<T>(data))
            .map(|(address, data)| decode_record::<T>(data).map(|record| (*address, record)))
            .collect::<Result<Vec<_>, _>>()?;
        records.sort_by_key(|(address, _)| *address);
        Ok(records)
    }

    /// Applies every staged write to the store.
    pub fn commit(self) {
        let writes = self.staged.len();
        for (address, data) in self.staged {
            match data {
                Some(data) => {
                    self.store.accounts.insert(address, data);
                }
                None => {
                    self.store.accounts.remove(&address);
                }
            }
        }
        trace!(writes, size = self.store.accounts.len(), "Committed");
    }
}
