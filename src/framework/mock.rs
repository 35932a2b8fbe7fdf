//! # Test Doubles
//!
//! Utilities for testing code built on the activation framework without
//! standing up a real instance.
//!
//! - [`RecordingSink`] captures every record an activation logs, so tests can
//!   assert on what the instance observed (for example every tick it received).
//! - [`MockHost`] answers an [`ActivationClient`] from a queue of scripted
//!   responses, for testing client wrappers in isolation.
//!
//! ## When to use Mocks vs Real Hosts
//!
//! | Feature | MockHost | ActivationHost |
//! |---------|----------|----------------|
//! | **State** | None (scripted replies) | Real lifecycle |
//! | **Use Case** | Testing client wrappers and error mapping | Testing the instance itself |
//! | **Error Injection** | Easy (`return_err`) | Requires driving the instance into that state |

use crate::framework::{Activation, ActivationClient, HostRequest, LogSink};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tracing::Level;

// =============================================================================
// RECORDING SINK
// =============================================================================

/// A [`LogSink`] that keeps every record in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<(Level, String)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages that start with `prefix`, in the order they were logged.
    pub fn messages_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(_, m)| m.starts_with(prefix))
            .map(|(_, m)| m)
            .collect()
    }

    /// Whether any record contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.records().iter().any(|(_, m)| m.contains(needle))
    }
}

impl LogSink for RecordingSink {
    fn log(&self, level: Level, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}

// =============================================================================
// MOCK HOST
// =============================================================================

enum Expectation<A: Activation> {
    Activate { response: Result<(), A::Error> },
    Call { response: Result<A::Reply, A::Error> },
    Deactivate,
}

/// A host stand-in that replies to requests from a queue of expectations.
///
/// Requests must arrive in the order the expectations were queued; a mismatch
/// panics the background task, which the client observes as `HostDropped`.
///
/// # Example
/// ```ignore
/// let mut mock = MockHost::<HelloGrain>::new();
/// mock.expect_call().return_ok(HelloReply::Greeting("hi".into()));
///
/// let client = HelloClient::new(mock.client());
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockHost<A: Activation> {
    client: ActivationClient<A>,
    expectations: Arc<Mutex<VecDeque<Expectation<A>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<A: Activation> MockHost<A> {
    /// Creates a new mock host with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<HostRequest<A>>(100);
        let expectations: Arc<Mutex<VecDeque<Expectation<A>>>> =
            Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();

                match (request, expectation) {
                    (
                        HostRequest::Activate { respond_to },
                        Some(Expectation::Activate { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (HostRequest::Call { respond_to, .. }, Some(Expectation::Call { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (HostRequest::Deactivate { respond_to }, Some(Expectation::Deactivate)) => {
                        let _ = respond_to.send(());
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ActivationClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client connected to this mock.
    pub fn client(&self) -> ActivationClient<A> {
        self.client.clone()
    }

    /// Expects an `activate` request.
    pub fn expect_activate(&mut self) -> ActivateExpectationBuilder<A> {
        ActivateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `call` request.
    pub fn expect_call(&mut self) -> CallExpectationBuilder<A> {
        CallExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `deactivate` request.
    pub fn expect_deactivate(&mut self) {
        self.push(Expectation::Deactivate);
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn push(&self, expectation: Expectation<A>) {
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(expectation);
    }
}

impl<A: Activation> Default for MockHost<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `activate` expectations.
pub struct ActivateExpectationBuilder<A: Activation> {
    expectations: Arc<Mutex<VecDeque<Expectation<A>>>>,
}

impl<A: Activation> ActivateExpectationBuilder<A> {
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    pub fn return_err(self, error: A::Error) {
        self.push(Err(error));
    }

    fn push(self, response: Result<(), A::Error>) {
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Expectation::Activate { response });
    }
}

/// Builder for `call` expectations.
pub struct CallExpectationBuilder<A: Activation> {
    expectations: Arc<Mutex<VecDeque<Expectation<A>>>>,
}

impl<A: Activation> CallExpectationBuilder<A> {
    pub fn return_ok(self, reply: A::Reply) {
        self.push(Ok(reply));
    }

    pub fn return_err(self, error: A::Error) {
        self.push(Err(error));
    }

    fn push(self, response: Result<A::Reply, A::Error>) {
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Expectation::Call { response });
    }
}
