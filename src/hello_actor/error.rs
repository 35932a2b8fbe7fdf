//! Error types for the Hello grain.

use crate::framework::{ActivationState, FrameworkError};
use crate::ticks::StreamError;
use thiserror::Error;

/// Errors that can occur during Hello grain operations.
///
/// All of these are local and non-retriable; a host maps them to whatever
/// failure channel its callers use.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GrainError {
    /// A call arrived outside the `Active` window.
    #[error("Grain is not active (state: {state})")]
    NotActive { state: ActivationState },

    /// A lifecycle request arrived in a state that cannot accept it.
    #[error("Invalid lifecycle state: {state}")]
    InvalidState { state: ActivationState },

    /// `Activate` was requested a second time.
    #[error("Grain already activated")]
    AlreadyActivated,

    /// The call's arguments were rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A push reached a closed stream. Indicates a teardown-ordering bug.
    #[error("Stream closed: {0}")]
    StreamClosed(#[from] StreamError),

    /// The hosting mailbox failed.
    #[error("Host error: {0}")]
    Host(#[from] FrameworkError),
}
