//! AccountEntity implementation for the Comment domain type.
//!
//! A comment is scoped by its parent post, so the hooks here are where the
//! Relation Maintainer runs.

use super::relation;
use crate::model::{
    Comment, CommentCreate, CommentUpdate, COMMENT_ACCOUNT_SPACE, COMMENT_CONTENT_MAX_LEN,
};
use crate::post_account::entity::check_len;
use ledger_framework::codec::{RecordReader, RecordWriter};
use ledger_framework::{
    AccountEntity, Address, Identity, LedgerError, Namespace, RecordId, Transaction,
};

impl AccountEntity for Comment {
    const ACCOUNT_NAME: &'static str = "Comment";
    const NAMESPACE: Namespace = Namespace::new("comment");
    const SPACE: usize = COMMENT_ACCOUNT_SPACE;

    type Create = CommentCreate;
    type Update = CommentUpdate;

    fn owner(&self) -> &Identity {
        &self.owner
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn scope(&self) -> Address {
        self.parent
    }

    fn scope_for(_actor: &Identity, params: &CommentCreate) -> Address {
        params.parent
    }

    fn from_create_params(
        owner: Identity,
        id: RecordId,
        params: CommentCreate,
        now: i64,
    ) -> Result<Self, LedgerError> {
        check_len("content", &params.content, COMMENT_CONTENT_MAX_LEN)?;
        Ok(Self {
            owner,
            parent: params.parent,
            id,
            content: params.content,
            created_at: now,
            updated_at: now,
        })
    }

    fn on_create(
        &mut self,
        _address: &Address,
        tx: &mut Transaction<'_>,
    ) -> Result<(), LedgerError> {
        relation::attach(&self.parent, tx)
    }

    fn on_update(&mut self, update: CommentUpdate, now: i64) -> Result<(), LedgerError> {
        check_len("content", &update.content, COMMENT_CONTENT_MAX_LEN)?;
        self.content = update.content;
        self.updated_at = now.max(self.updated_at);
        Ok(())
    }

    fn on_delete(&self, _address: &Address, tx: &mut Transaction<'_>) -> Result<(), LedgerError> {
        relation::detach(&self.parent, tx)
    }

    fn encode(&self, writer: &mut RecordWriter) -> Result<(), LedgerError> {
        writer.put_identity(&self.owner);
        writer.put_address(&self.parent);
        writer.put_record_id(&self.id);
        writer.put_i64(self.created_at);
        writer.put_i64(self.updated_at);
        writer.put_str("content", &self.content, COMMENT_CONTENT_MAX_LEN)
    }

    fn decode(reader: &mut RecordReader<'_>) -> Result<Self, LedgerError> {
        Ok(Self {
            owner: reader.get_identity()?,
            parent: reader.get_address()?,
            id: reader.get_record_id()?,
            created_at: reader.get_i64()?,
            updated_at: reader.get_i64()?,
            content: reader.get_str("content", COMMENT_CONTENT_MAX_LEN)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_framework::codec::{decode_record, encode_record};
    use ledger_framework::Keypair;

    fn comment(content: &str) -> Result<Comment, LedgerError> {
        Comment::from_create_params(
            Keypair::generate().identity(),
            RecordId::from(1),
            CommentCreate::new(Address::new_from_array([5; 32]), content),
            1_700_000_000,
        )
    }

    #[test]
    fn test_full_budget_comment_round_trips() {
        let comment = comment(&"c".repeat(COMMENT_CONTENT_MAX_LEN)).unwrap();
        let bytes = encode_record(&comment).unwrap();
        assert_eq!(bytes.len(), COMMENT_ACCOUNT_SPACE);
        assert_eq!(decode_record::<Comment>(&bytes).unwrap(), comment);
    }

    #[test]
    fn test_oversized_content_is_rejected() {
        let err = comment(&"c".repeat(COMMENT_CONTENT_MAX_LEN + 1)).unwrap_err();
        assert!(matches!(err, LedgerError::Overflow { field: "content", .. }));
    }

    #[test]
    fn test_scope_is_the_parent_post() {
        let comment = comment("Great post!").unwrap();
        assert_eq!(comment.scope(), Address::new_from_array([5; 32]));
    }

    #[test]
    fn test_update_replaces_content() {
        let mut comment = comment("first").unwrap();
        comment
            .on_update(CommentUpdate { content: "edited".into() }, 1_700_000_050)
            .unwrap();
        assert_eq!(comment.content, "edited");
        assert_eq!(comment.updated_at, 1_700_000_050);
    }
}
