use ledger_framework::{Address, Identity, RecordId};
use serde::{Deserialize, Serialize};

/// Bytes reserved for every Comment record.
pub const COMMENT_ACCOUNT_SPACE: usize = 624;

/// discriminator | owner | parent | id | created_at | updated_at
pub const COMMENT_HEADER_LEN: usize = 8 + 32 + 32 + 32 + 8 + 8;

pub const COMMENT_CONTENT_MAX_LEN: usize = COMMENT_ACCOUNT_SPACE - COMMENT_HEADER_LEN - 4;

/// A comment on a post. Its address derives from `("comment", parent, id)`, so
/// ids only need to be unique per post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub owner: Identity,
    pub parent: Address,
    pub id: RecordId,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Payload for adding a comment to the post at `parent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreate {
    pub parent: Address,
    pub content: String,
}

impl CommentCreate {
    pub fn new(parent: Address, content: impl Into<String>) -> Self {
        Self {
            parent,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentUpdate {
    pub content: String,
}
