//! # Generic Client
//!
//! This module defines the typed client for sending requests to the `LedgerActor`.

use crate::address::{derive_address, Address, Identity, RecordId};
use crate::entity::AccountEntity;
use crate::error::LedgerError;
use crate::message::{Dispatch, ResourceRequest};
use std::marker::PhantomData;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for records of kind `T`.
///
/// Holds only a sender and the program id, so cloning is cheap. Every method
/// resolves to `Result<…, LedgerError>`; a stopped actor surfaces as
/// [`LedgerError::ActorClosed`] or [`LedgerError::ActorDropped`].
#[derive(Clone)]
pub struct ResourceClient<T: AccountEntity> {
    sender: mpsc::Sender<Box<dyn Dispatch>>,
    program_id: Address,
    _entity: PhantomData<fn() -> T>,
}

impl<T: AccountEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<Box<dyn Dispatch>>, program_id: Address) -> Self {
        Self {
            sender,
            program_id,
            _entity: PhantomData,
        }
    }

    pub fn program_id(&self) -> &Address {
        &self.program_id
    }

    /// The address a record with `scope` and `id` lives at. Computed locally.
    pub fn address_of(&self, scope: &Address, id: &RecordId) -> Result<Address, LedgerError> {
        derive_address(&self.program_id, T::NAMESPACE, scope, id).map(|derived| derived.address)
    }

    async fn request<R>(
        &self,
        request: ResourceRequest<T>,
        response: oneshot::Receiver<Result<R, LedgerError>>,
    ) -> Result<R, LedgerError> {
        self.sender
            .send(Box::new(request))
            .await
            .map_err(|_| LedgerError::ActorClosed)?;
        response.await.map_err(|_| LedgerError::ActorDropped)?
    }

    pub async fn create(
        &self,
        actor: Identity,
        id: RecordId,
        params: T::Create,
    ) -> Result<Address, LedgerError> {
        let (respond_to, response) = oneshot::channel();
        let request = ResourceRequest::Create {
            actor,
            id,
            params,
            respond_to,
        };
        self.request(request, response).await
    }

    pub async fn get(&self, address: Address) -> Result<T, LedgerError> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Get { address, respond_to }, response)
            .await
    }

    pub async fn update(
        &self,
        actor: Identity,
        address: Address,
        update: T::Update,
    ) -> Result<T, LedgerError> {
        let (respond_to, response) = oneshot::channel();
        let request = ResourceRequest::Update {
            actor,
            address,
            update,
            respond_to,
        };
        self.request(request, response).await
    }

    pub async fn delete(&self, actor: Identity, address: Address) -> Result<(), LedgerError> {
        let (respond_to, response) = oneshot::channel();
        let request = ResourceRequest::Delete {
            actor,
            address,
            respond_to,
        };
        self.request(request, response).await
    }

    pub async fn list(&self, scope: Option<Address>) -> Result<Vec<(Address, T)>, LedgerError> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::List { scope, respond_to }, response)
            .await
    }
}
