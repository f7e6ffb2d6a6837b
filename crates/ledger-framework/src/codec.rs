//! # Record Codec
//!
//! Fixed-layout binary encoding for account records.
//!
//! Every record starts with an 8-byte discriminator naming its kind, followed by
//! the entity's own fields in declaration order. Integers are little-endian and
//! text fields carry a `u32` length prefix. The encoded bytes are zero-padded up
//! to the record's total budget ([`AccountEntity::SPACE`]), which is reserved in
//! full at creation so that updates never need to resize.
//!
//! Budgets are enforced on both sides: the writer rejects oversized fields with
//! [`LedgerError::Overflow`] before anything is stored, and the reader rejects
//! anything it would not have written with [`LedgerError::CorruptRecord`].

use crate::address::{Address, Identity, RecordId, ADDRESS_LEN};
use crate::entity::AccountEntity;
use crate::error::LedgerError;
use sha2::{Digest, Sha256};

pub const DISCRIMINATOR_LEN: usize = 8;

/// Length prefix of a text field.
pub const LEN_PREFIX: usize = 4;

/// The discriminator for accounts named `name`: `sha256("account:<name>")[..8]`.
pub fn discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(format!("account:{name}").as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

/// Encodes `record` into exactly `T::SPACE` bytes.
pub fn encode_record<T: AccountEntity>(record: &T) -> Result<Vec<u8>, LedgerError> {
    let mut writer = RecordWriter::new(T::SPACE);
    writer.put_discriminator(&discriminator(T::ACCOUNT_NAME));
    record.encode(&mut writer)?;
    writer.finish()
}

/// Decodes a record of kind `T` from its stored bytes.
pub fn decode_record<T: AccountEntity>(data: &[u8]) -> Result<T, LedgerError> {
    if data.len() != T::SPACE {
        return Err(LedgerError::corrupt(format!(
            "{} record is {} bytes, expected {}",
            T::ACCOUNT_NAME,
            data.len(),
            T::SPACE
        )));
    }
    let mut reader = RecordReader::new(data);
    reader.expect_discriminator(&discriminator(T::ACCOUNT_NAME))?;
    let record = T::decode(&mut reader)?;
    reader.finish()?;
    Ok(record)
}

/// Returns true if `data` carries the discriminator of `T`.
pub fn is_kind<T: AccountEntity>(data: &[u8]) -> bool {
    data.len() >= DISCRIMINATOR_LEN
        && data[..DISCRIMINATOR_LEN] == discriminator(T::ACCOUNT_NAME)
}

// =============================================================================
// Writer
// =============================================================================

/// Appends record fields into a buffer bounded by a fixed capacity.
#[derive(Debug)]
pub struct RecordWriter {
    buf: Vec<u8>,
    capacity: usize,
}

impl RecordWriter {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn put_discriminator(&mut self, discriminator: &[u8; DISCRIMINATOR_LEN]) {
        self.buf.extend_from_slice(discriminator);
    }

    pub fn put_address(&mut self, address: &Address) {
        self.buf.extend_from_slice(address.as_ref());
    }

    pub fn put_identity(&mut self, identity: &Identity) {
        self.buf.extend_from_slice(identity.as_ref());
    }

    pub fn put_record_id(&mut self, id: &RecordId) {
        self.buf.extend_from_slice(id.as_ref());
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a length-prefixed string, rejecting it if it exceeds `budget` bytes.
    pub fn put_str(
        &mut self,
        field: &'static str,
        value: &str,
        budget: usize,
    ) -> Result<(), LedgerError> {
        if value.len() > budget {
            return Err(LedgerError::overflow(field, value.len(), budget));
        }
        self.put_u32(value.len() as u32);
        self.buf.extend_from_slice(value.as_bytes());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Pads the record to its full capacity.
    pub fn finish(mut self) -> Result<Vec<u8>, LedgerError> {
        if self.buf.len() > self.capacity {
            return Err(LedgerError::overflow("record", self.buf.len(), self.capacity));
        }
        self.buf.resize(self.capacity, 0);
        Ok(self.buf)
    }
}

// =============================================================================
// Reader
// =============================================================================

/// Reads record fields back in the order they were written.
#[derive(Debug)]
pub struct RecordReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], LedgerError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| {
                LedgerError::corrupt(format!(
                    "truncated at offset {}: need {n} bytes, {} left",
                    self.pos,
                    self.data.len() - self.pos
                ))
            })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], LedgerError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn expect_discriminator(
        &mut self,
        expected: &[u8; DISCRIMINATOR_LEN],
    ) -> Result<(), LedgerError> {
        let found: [u8; DISCRIMINATOR_LEN] = self.take_array()?;
        if &found != expected {
            return Err(LedgerError::corrupt("discriminator mismatch"));
        }
        Ok(())
    }

    pub fn get_address(&mut self) -> Result<Address, LedgerError> {
        Ok(Address::new_from_array(self.take_array::<ADDRESS_LEN>()?))
    }

    /// Reads an identity, rejecting bytes that are not a valid public key.
    pub fn get_identity(&mut self) -> Result<Identity, LedgerError> {
        let bytes = self.take_array::<ADDRESS_LEN>()?;
        Identity::from_bytes(bytes).map_err(|e| LedgerError::corrupt(format!("owner: {e}")))
    }

    pub fn get_record_id(&mut self) -> Result<RecordId, LedgerError> {
        Ok(RecordId::new_from_array(self.take_array::<32>()?))
    }

    pub fn get_u32(&mut self) -> Result<u32, LedgerError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn get_i64(&mut self) -> Result<i64, LedgerError> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    pub fn get_str(&mut self, field: &'static str, budget: usize) -> Result<String, LedgerError> {
        let len = self.get_u32()? as usize;
        if len > budget {
            return Err(LedgerError::corrupt(format!(
                "{field} declares {len} bytes, budget is {budget}"
            )));
        }
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| LedgerError::corrupt(format!("{field}: {e}")))
    }

    /// Everything after the declared fields must be padding.
    pub fn finish(self) -> Result<(), LedgerError> {
        match self.data[self.pos..].iter().position(|b| *b != 0) {
            Some(offset) => Err(LedgerError::corrupt(format!(
                "trailing data at offset {}",
                self.pos + offset
            ))),
            None => Ok(()),
        }
    }
}
