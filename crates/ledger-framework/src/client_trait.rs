//! # ActorClient Trait
//!
//! Provides a common interface for record-specific clients, adding default `get`,
//! `delete` and `list` methods built on top of a generic `ResourceClient`.
use crate::{AccountEntity, Address, Identity, LedgerError, ResourceClient};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the standard operations.
///
/// Implementors only supply [`inner`](ActorClient::inner); errors convert
/// through `From<LedgerError>` unless [`map_error`](ActorClient::map_error) is
/// overridden.
///
/// # Example
///
/// ```ignore
/// struct PostClient {
///     inner: ResourceClient<Post>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Post> for PostClient {
///     type Error = BlogError;
///
///     fn inner(&self) -> &ResourceClient<Post> {
///         &self.inner
///     }
/// }
///
/// // get(), delete() and list() are provided automatically.
/// let post = client.get(address).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: AccountEntity>: Send + Sync {
    /// The record-specific error type.
    type Error: From<LedgerError> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map ledger errors to the specific error type.
    fn map_error(e: LedgerError) -> Self::Error {
        e.into()
    }

    /// Fetch a record by address.
    #[tracing::instrument(skip(self))]
    async fn get(&self, address: Address) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(address).await.map_err(Self::map_error)
    }

    /// Delete a record on behalf of `actor`.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, actor: Identity, address: Address) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(actor, address).await.map_err(Self::map_error)
    }

    /// Every record, or only those under `scope`.
    #[tracing::instrument(skip(self))]
    async fn list(&self, scope: Option<Address>) -> Result<Vec<(Address, T)>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(scope).await.map_err(Self::map_error)
    }
}
