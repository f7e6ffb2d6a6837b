//! # Mock Client
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of expectations instead of a ledger. Use it to test code
//! that sits *around* a client (request wrappers, error mapping, orchestration)
//! without spawning a `LedgerActor`.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None (expectations) | Real account store |
//! | **Error Injection** | Easy (`return_err`) | Requires building the state |
//! | **Use Case** | Logic around the client | The ledger itself, or the full system |
//!
//! ```ignore
//! let mut mock = MockClient::<Post>::new();
//! mock.expect_create().return_ok(address);
//! mock.expect_get(address).return_err(LedgerError::NotFound(address));
//!
//! let client = mock.client();
//! // drive the code under test with `client` ...
//! mock.verify();
//! ```
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation gets no answer (the caller sees [`LedgerError::ActorDropped`]) and
//! is reported by [`MockClient::verify`].

use crate::address::Address;
use crate::client::ResourceClient;
use crate::entity::AccountEntity;
use crate::error::LedgerError;
use crate::message::{Dispatch, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

enum Expectation<T: AccountEntity> {
    Create {
        response: Result<Address, LedgerError>,
    },
    Get {
        address: Address,
        response: Result<T, LedgerError>,
    },
    Update {
        address: Address,
        response: Result<T, LedgerError>,
    },
    Delete {
        address: Address,
        response: Result<(), LedgerError>,
    },
    List {
        scope: Option<Address>,
        response: Result<Vec<(Address, T)>, LedgerError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock client with expectation tracking.
pub struct MockClient<T: AccountEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: AccountEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: AccountEntity> MockClient<T> {
    /// Creates a mock with no expectations, using the all-zero program id.
    pub fn new() -> Self {
        Self::with_program_id(Address::default())
    }

    /// Must be called from within a Tokio runtime.
    pub fn with_program_id(program_id: Address) -> Self {
        let (sender, mut receiver) = mpsc::channel::<Box<dyn Dispatch>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));

        let queue = expectations.clone();
        let report = mismatches.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let request = match request.into_any().downcast::<ResourceRequest<T>>() {
                    Ok(request) => *request,
                    Err(_) => {
                        lock(&report).push("request for another record kind".to_string());
                        continue;
                    }
                };
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Get { address, respond_to },
                        Some(Expectation::Get { address: expected, response }),
                    ) if address == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { address, respond_to, .. },
                        Some(Expectation::Update { address: expected, response }),
                    ) if address == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { address, respond_to, .. },
                        Some(Expectation::Delete { address: expected, response }),
                    ) if address == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { scope, respond_to },
                        Some(Expectation::List { scope: expected, response }),
                    ) if scope == expected => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        lock(&report).push(format!("unexpected request: {request:?}"));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender, program_id),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, Address> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Create { response })
    }

    pub fn expect_get(&mut self, address: Address) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(&self.expectations, move |response| {
            Expectation::Get { address, response }
        })
    }

    pub fn expect_update(&mut self, address: Address) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(&self.expectations, move |response| {
            Expectation::Update { address, response }
        })
    }

    pub fn expect_delete(&mut self, address: Address) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(&self.expectations, move |response| {
            Expectation::Delete { address, response }
        })
    }

    pub fn expect_list(
        &mut self,
        scope: Option<Address>,
    ) -> ExpectationBuilder<T, Vec<(Address, T)>> {
        ExpectationBuilder::new(&self.expectations, move |response| {
            Expectation::List { scope, response }
        })
    }

    /// Panics unless every expectation was consumed by a matching request.
    pub fn verify(&self) {
        let mismatches = lock(&self.mismatches);
        if !mismatches.is_empty() {
            panic!("Mock received mismatched requests: {:?}", *mismatches);
        }
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Queues the response for one expected request.
pub struct ExpectationBuilder<T: AccountEntity, R> {
    expectations: Queue<T>,
    build: Box<dyn FnOnce(Result<R, LedgerError>) -> Expectation<T> + Send>,
}

impl<T: AccountEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: &Queue<T>,
        build: impl FnOnce(Result<R, LedgerError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations: expectations.clone(),
            build: Box::new(build),
        }
    }

    /// Answer the request successfully with `value`.
    pub fn return_ok(self, value: R) {
        let expectation = (self.build)(Ok(value));
        lock(&self.expectations).push_back(expectation);
    }

    /// Answer the request with `error`.
    pub fn return_err(self, error: LedgerError) {
        let expectation = (self.build)(Err(error));
        lock(&self.expectations).push_back(expectation);
    }
}
