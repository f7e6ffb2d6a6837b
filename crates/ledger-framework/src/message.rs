//! # Generic Messages
//!
//! This module defines the request types sent from a `ResourceClient` to the
//! `LedgerActor`.
//!
//! One actor serves every record kind, so requests travel type-erased as
//! `Box<dyn Dispatch>`. Each [`ResourceRequest<T>`] knows how to apply itself to
//! the [`Ledger`] for its own `T`.

use crate::address::{Address, Identity, RecordId};
use crate::entity::AccountEntity;
use crate::error::LedgerError;
use crate::ledger::Ledger;
use std::any::Any;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, LedgerError>>;

/// A request for one ledger operation on records of kind `T`.
///
/// The variants map onto the ledger's CRUD operations plus `List`, the
/// scoped query clients use to render a feed or a comment thread.
#[derive(Debug)]
pub enum ResourceRequest<T: AccountEntity> {
    Create {
        actor: Identity,
        id: RecordId,
        params: T::Create,
        respond_to: Response<Address>,
    },
    Get {
        address: Address,
        respond_to: Response<T>,
    },
    Update {
        actor: Identity,
        address: Address,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        actor: Identity,
        address: Address,
        respond_to: Response<()>,
    },
    List {
        scope: Option<Address>,
        respond_to: Response<Vec<(Address, T)>>,
    },
}

/// A type-erased request the actor can apply to its ledger.
pub trait Dispatch: Send + 'static {
    /// Runs the operation and answers on the request's response channel.
    fn dispatch(self: Box<Self>, ledger: &mut Ledger);

    /// Recovers the concrete request, used by [`MockClient`](crate::mock::MockClient).
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T: AccountEntity> Dispatch for ResourceRequest<T> {
    fn dispatch(self: Box<Self>, ledger: &mut Ledger) {
        // A caller that stopped waiting is not an error for the ledger.
        match *self {
            ResourceRequest::Create {
                actor,
                id,
                params,
                respond_to,
            } => {
                let _ = respond_to.send(ledger.create::<T>(actor, id, params));
            }
            ResourceRequest::Get { address, respond_to } => {
                let _ = respond_to.send(ledger.get::<T>(&address));
            }
            ResourceRequest::Update {
                actor,
                address,
                update,
                respond_to,
            } => {
                let _ = respond_to.send(ledger.update::<T>(actor, &address, update));
            }
            ResourceRequest::Delete {
                actor,
                address,
                respond_to,
            } => {
                let _ = respond_to.send(ledger.delete::<T>(actor, &address));
            }
            ResourceRequest::List { scope, respond_to } => {
                let _ = respond_to.send(ledger.list::<T>(scope));
            }
        }
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}
