use crate::error::BlogError;
use crate::model::{Comment, CommentCreate, CommentUpdate};
use async_trait::async_trait;
use ledger_framework::{ActorClient, Address, Identity, RecordId, ResourceClient};
use tracing::{debug, instrument};

/// Client for Comment records.
#[derive(Clone)]
pub struct CommentClient {
    inner: ResourceClient<Comment>,
}

impl CommentClient {
    pub fn new(inner: ResourceClient<Comment>) -> Self {
        Self { inner }
    }

    /// Where comment `id` on the post at `post` lives.
    pub fn comment_address(&self, post: &Address, id: &RecordId) -> Result<Address, BlogError> {
        Ok(self.inner.address_of(post, id)?)
    }

    /// Adds a comment and bumps the post's `comment_count` in the same step.
    #[instrument(skip(self, content))]
    pub async fn add_comment(
        &self,
        author: Identity,
        post: Address,
        id: RecordId,
        content: String,
    ) -> Result<Address, BlogError> {
        debug!(content_len = content.len(), "Sending request");
        self.inner
            .create(author, id, CommentCreate::new(post, content))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, content))]
    pub async fn update_comment(
        &self,
        author: Identity,
        address: Address,
        content: String,
    ) -> Result<Comment, BlogError> {
        debug!("Sending request");
        self.inner
            .update(author, address, CommentUpdate { content })
            .await
            .map_err(Self::map_error)
    }

    /// Deletes a comment and decrements the post's `comment_count` in the same step.
    pub async fn delete_comment(
        &self,
        author: Identity,
        address: Address,
    ) -> Result<(), BlogError> {
        self.delete(author, address).await
    }

    /// The comments on the post at `post`, in address order.
    pub async fn comments_for(&self, post: Address) -> Result<Vec<(Address, Comment)>, BlogError> {
        self.list(Some(post)).await
    }
}

#[async_trait]
impl ActorClient<Comment> for CommentClient {
    type Error = BlogError;

    fn inner(&self) -> &ResourceClient<Comment> {
        &self.inner
    }
}
