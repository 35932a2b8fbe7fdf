//! # Hello Client
//!
//! Provides a high-level API for interacting with a hosted Hello grain.
//! It wraps an `ActivationClient<HelloGrain>` and exposes one method per call.
use crate::framework::{ActivationClient, FrameworkError};
use crate::hello_actor::{GrainError, HelloCall, HelloGrain, HelloReply};
use crate::ticks::Tick;
use tracing::{debug, instrument};

/// Client for interacting with the Hello grain.
#[derive(Clone)]
pub struct HelloClient {
    inner: ActivationClient<HelloGrain>,
}

impl HelloClient {
    pub fn new(inner: ActivationClient<HelloGrain>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn activate(&self) -> Result<(), GrainError> {
        debug!("Sending request");
        self.inner.activate().await
    }

    #[instrument(skip(self))]
    pub async fn say_hello(&self, greeting: &str) -> Result<String, GrainError> {
        debug!("Sending request");
        let call = HelloCall::SayHello {
            greeting: greeting.to_string(),
        };
        match self.inner.call(call).await? {
            HelloReply::Greeting(reply) => Ok(reply),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn do_tick(&self, tick: Tick) -> Result<(), GrainError> {
        debug!("Sending request");
        match self.inner.call(HelloCall::DoTick { tick }).await? {
            HelloReply::TickAccepted => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Schedules `count` ticks; returns as soon as they are scheduled.
    #[instrument(skip(self))]
    pub async fn apply_dot(&self, count: i32) -> Result<String, GrainError> {
        debug!("Sending request");
        match self.inner.call(HelloCall::ApplyDot { count }).await? {
            HelloReply::DotApplied(reply) => Ok(reply),
            other => Err(unexpected(other)),
        }
    }

    /// Deactivates the grain. Teardown itself never fails; only a closed host is reported.
    #[instrument(skip(self))]
    pub async fn deactivate(&self) -> Result<(), GrainError> {
        debug!("Sending request");
        Ok(self.inner.deactivate().await?)
    }
}

fn unexpected(reply: HelloReply) -> GrainError {
    FrameworkError::UnexpectedReply(format!("{reply:?}")).into()
}
