//! # Activation Contract
//!
//! The narrow contract between a host and an activation-scoped instance.
//!
//! A host constructs the instance (plain `new`, dependencies injected there), then
//! drives it through [`Activation::on_activate`], any number of serialized
//! [`Activation::handle_call`] turns, and finally [`Activation::on_deactivate`].
//! The host never calls two of these concurrently on the same instance.

use crate::framework::FrameworkError;
use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Lifecycle state of an activation.
///
/// State transitions are linear:
///
/// ```text
/// Created ──> Active ──> Deactivating ──> Disposed
///    │                        ^
///    └────────────────────────┘   (teardown of a never-activated instance)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationState {
    /// Constructed, not yet activated. No calls are accepted.
    #[default]
    Created,
    /// Accepting calls.
    Active,
    /// Teardown in progress. Calls are rejected.
    Deactivating,
    /// Teardown finished. All producers are stopped and the stream is closed.
    Disposed,
}

impl ActivationState {
    /// Only `Active` accepts calls.
    pub fn can_invoke(&self) -> bool {
        matches!(self, ActivationState::Active)
    }

    /// Check whether `self -> next` is a legal transition.
    pub fn can_transition_to(&self, next: ActivationState) -> bool {
        matches!(
            (self, next),
            (ActivationState::Created, ActivationState::Active)
                | (ActivationState::Created, ActivationState::Deactivating)
                | (ActivationState::Active, ActivationState::Deactivating)
                | (ActivationState::Deactivating, ActivationState::Disposed)
        )
    }
}

impl Display for ActivationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivationState::Created => write!(f, "created"),
            ActivationState::Active => write!(f, "active"),
            ActivationState::Deactivating => write!(f, "deactivating"),
            ActivationState::Disposed => write!(f, "disposed"),
        }
    }
}

/// Trait implemented by any type that can be hosted by an
/// [`ActivationHost`](crate::framework::ActivationHost).
///
/// # Associated Types
/// - `Call` is the closed set of operations the instance accepts.
/// - `Reply` is what a successful call returns.
/// - `Error` must absorb [`FrameworkError`] so clients can report mailbox failures
///   through the same error type as call failures.
#[async_trait]
pub trait Activation: Send + 'static {
    type Call: Send + Debug;
    type Reply: Send + Debug;
    type Error: std::error::Error + From<FrameworkError> + Send + Sync + 'static;

    /// Current lifecycle state.
    fn state(&self) -> ActivationState;

    /// Called once by the host before the first call is dispatched.
    async fn on_activate(&mut self) -> Result<(), Self::Error>;

    /// Handle one call. Runs inside a single turn.
    async fn handle_call(&mut self, call: Self::Call) -> Result<Self::Reply, Self::Error>;

    /// Tear down the instance. Must be idempotent; failures are logged, not returned.
    ///
    /// A call whose future was dropped before completing must be finished by the
    /// next call.
    async fn on_deactivate(&mut self);
}
