use ledger_framework::{Identity, RecordId};
use serde::{Deserialize, Serialize};

/// Maximum title length in bytes.
pub const TITLE_MAX_LEN: usize = 100;

/// Bytes reserved for every Post record, regardless of its content.
pub const POST_ACCOUNT_SPACE: usize = 1000;

/// discriminator | owner | id | comment_count | created_at | updated_at
pub const POST_HEADER_LEN: usize = 8 + 32 + 32 + 4 + 8 + 8;

/// Content budget: whatever the record has left after the header, the title
/// reservation and the content length prefix.
pub const POST_CONTENT_MAX_LEN: usize =
    POST_ACCOUNT_SPACE - POST_HEADER_LEN - (4 + TITLE_MAX_LEN) - 4;

/// A blog post.
///
/// # Ledger
/// This struct implements [`AccountEntity`](ledger_framework::AccountEntity) in
/// [`post_account`](crate::post_account). Its address derives from
/// `("post", owner, id)`.
///
/// `comment_count` is never set by callers. It changes only when a Comment on
/// this post is created or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub owner: Identity,
    pub id: RecordId,
    pub title: String,
    pub content: String,
    pub comment_count: u32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Payload for creating a new post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreate {
    pub title: String,
    pub content: String,
}

impl PostCreate {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Payload for updating an existing post. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_budget_follows_from_record_space() {
        assert_eq!(POST_HEADER_LEN, 92);
        assert_eq!(POST_CONTENT_MAX_LEN, 800);
    }
}
