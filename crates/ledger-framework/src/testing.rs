//! Minimal entity shared by the unit tests of this crate.

use crate::address::{derive_address, Address, Identity, Namespace, RecordId};
use crate::codec::{RecordReader, RecordWriter};
use crate::entity::AccountEntity;
use crate::error::LedgerError;

pub const TEXT_BUDGET: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub owner: Identity,
    pub id: RecordId,
    pub text: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Note {
    pub fn new(owner: Identity, id: u64, text: &str) -> Self {
        Self {
            owner,
            id: RecordId::from(id),
            text: text.to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }
}

pub fn note_address(note: &Note) -> Address {
    derive_address(&Address::default(), Note::NAMESPACE, &note.scope(), &note.id)
        .unwrap()
        .address
}

impl AccountEntity for Note {
    const ACCOUNT_NAME: &'static str = "Note";
    const NAMESPACE: Namespace = Namespace::new("note");
    const SPACE: usize = 8 + 32 + 32 + 8 + 8 + 4 + TEXT_BUDGET;

    type Create = String;
    type Update = String;

    fn owner(&self) -> &Identity {
        &self.owner
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn scope(&self) -> Address {
        self.owner.as_address()
    }

    fn scope_for(actor: &Identity, _params: &String) -> Address {
        actor.as_address()
    }

    fn from_create_params(
        owner: Identity,
        id: RecordId,
        text: String,
        now: i64,
    ) -> Result<Self, LedgerError> {
        if text.len() > TEXT_BUDGET {
            return Err(LedgerError::overflow("text", text.len(), TEXT_BUDGET));
        }
        Ok(Self {
            owner,
            id,
            text,
            created_at: now,
            updated_at: now,
        })
    }

    fn on_update(&mut self, text: String, now: i64) -> Result<(), LedgerError> {
        if text.len() > TEXT_BUDGET {
            return Err(LedgerError::overflow("text", text.len(), TEXT_BUDGET));
        }
        self.text = text;
        self.updated_at = now.max(self.updated_at);
        Ok(())
    }

    fn encode(&self, writer: &mut RecordWriter) -> Result<(), LedgerError> {
        writer.put_identity(&self.owner);
        writer.put_record_id(&self.id);
        writer.put_i64(self.created_at);
        writer.put_i64(self.updated_at);
        writer.put_str("text", &self.text, TEXT_BUDGET)
    }

    fn decode(reader: &mut RecordReader<'_>) -> Result<Self, LedgerError> {
        Ok(Self {
            owner: reader.get_identity()?,
            id: reader.get_record_id()?,
            created_at: reader.get_i64()?,
            updated_at: reader.get_i64()?,
            text: reader.get_str("text", TEXT_BUDGET)?,
        })
    }
}
