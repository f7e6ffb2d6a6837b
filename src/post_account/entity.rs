//! AccountEntity implementation for the Post domain type.
//!
//! Record layout (little-endian, zero-padded to [`POST_ACCOUNT_SPACE`]):
//!
//! ```text
//! discriminator  8
//! owner         32
//! id            32
//! comment_count  4   u32
//! created_at     8   i64
//! updated_at     8   i64
//! title          4 + ≤ TITLE_MAX_LEN
//! content        4 + ≤ POST_CONTENT_MAX_LEN
//! ```

use crate::comment_account::relation;
use crate::model::{
    Post, PostCreate, PostUpdate, POST_ACCOUNT_SPACE, POST_CONTENT_MAX_LEN, TITLE_MAX_LEN,
};
use ledger_framework::codec::{RecordReader, RecordWriter};
use ledger_framework::{
    AccountEntity, Address, Identity, LedgerError, Namespace, RecordId, Transaction,
};

pub(crate) fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), LedgerError> {
    if value.len() > max {
        return Err(LedgerError::overflow(field, value.len(), max));
    }
    Ok(())
}

impl AccountEntity for Post {
    const ACCOUNT_NAME: &'static str = "Post";
    const NAMESPACE: Namespace = Namespace::new("post");
    const SPACE: usize = POST_ACCOUNT_SPACE;

    type Create = PostCreate;
    type Update = PostUpdate;

    fn owner(&self) -> &Identity {
        &self.owner
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn scope(&self) -> Address {
        self.owner.as_address()
    }

    fn scope_for(actor: &Identity, _params: &PostCreate) -> Address {
        actor.as_address()
    }

    fn from_create_params(
        owner: Identity,
        id: RecordId,
        params: PostCreate,
        now: i64,
    ) -> Result<Self, LedgerError> {
        check_len("title", &params.title, TITLE_MAX_LEN)?;
        check_len("content", &params.content, POST_CONTENT_MAX_LEN)?;
        Ok(Self {
            owner,
            id,
            title: params.title,
            content: params.content,
            comment_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the given fields. Both are checked before either is applied.
    fn on_update(&mut self, update: PostUpdate, now: i64) -> Result<(), LedgerError> {
        if let Some(title) = &update.title {
            check_len("title", title, TITLE_MAX_LEN)?;
        }
        if let Some(content) = &update.content {
            check_len("content", content, POST_CONTENT_MAX_LEN)?;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        self.updated_at = now.max(self.updated_at);
        Ok(())
    }

    /// Closes every comment on this post along with it.
    fn on_delete(&self, address: &Address, tx: &mut Transaction<'_>) -> Result<(), LedgerError> {
        relation::close_thread(address, self.comment_count, tx)
    }

    fn encode(&self, writer: &mut RecordWriter) -> Result<(), LedgerError> {
        writer.put_identity(&self.owner);
        writer.put_record_id(&self.id);
        writer.put_u32(self.comment_count);
        writer.put_i64(self.created_at);
        writer.put_i64(self.updated_at);
        writer.put_str("title", &self.title, TITLE_MAX_LEN)?;
        writer.put_str("content", &self.content, POST_CONTENT_MAX_LEN)
    }

    fn decode(reader: &mut RecordReader<'_>) -> Result<Self, LedgerError> {
        Ok(Self {
            owner: reader.get_identity()?,
            id: reader.get_record_id()?,
            comment_count: reader.get_u32()?,
            created_at: reader.get_i64()?,
            updated_at: reader.get_i64()?,
            title: reader.get_str("title", TITLE_MAX_LEN)?,
            content: reader.get_str("content", POST_CONTENT_MAX_LEN)?,
        })
    }
}
