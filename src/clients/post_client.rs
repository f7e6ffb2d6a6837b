use crate::error::BlogError;
use crate::model::{Post, PostCreate, PostUpdate};
use async_trait::async_trait;
use ledger_framework::{ActorClient, Address, Identity, RecordId, ResourceClient};
use tracing::{debug, instrument};

/// Client for Post records.
#[derive(Clone)]
pub struct PostClient {
    inner: ResourceClient<Post>,
}

impl PostClient {
    pub fn new(inner: ResourceClient<Post>) -> Self {
        Self { inner }
    }

    /// Where the post `id` by `owner` lives, computed without a round trip.
    pub fn post_address(&self, owner: &Identity, id: &RecordId) -> Result<Address, BlogError> {
        Ok(self.inner.address_of(&owner.as_address(), id)?)
    }

    #[instrument(skip(self, post), fields(title = %post.title))]
    pub async fn create_post(
        &self,
        author: Identity,
        id: RecordId,
        post: PostCreate,
    ) -> Result<Address, BlogError> {
        debug!(content_len = post.content.len(), "Sending request");
        self.inner.create(author, id, post).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_post(
        &self,
        author: Identity,
        address: Address,
        update: PostUpdate,
    ) -> Result<Post, BlogError> {
        debug!("Sending request");
        self.inner
            .update(author, address, update)
            .await
            .map_err(Self::map_error)
    }

    /// Deletes the post together with every comment on it.
    pub async fn delete_post(&self, author: Identity, address: Address) -> Result<(), BlogError> {
        self.delete(author, address).await
    }

    /// Every post by `owner`, in address order.
    pub async fn posts_by(&self, owner: Identity) -> Result<Vec<(Address, Post)>, BlogError> {
        self.list(Some(owner.as_address())).await
    }
}

#[async_trait]
impl ActorClient<Post> for PostClient {
    type Error = BlogError;

    fn inner(&self) -> &ResourceClient<Post> {
        &self.inner
    }
}
