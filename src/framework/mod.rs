//! Generic hosting framework for activation-scoped instances.
//!
//! This module provides the building blocks a host needs to own one stateful
//! instance, feed it serialized calls, and tear it down.
//!
//! # Main Components
//!
//! - [`Activation`] - Lifecycle contract (activate, call, deactivate) an instance implements
//! - [`ActivationHost`] - Owns the instance and runs its turn loop
//! - [`ActivationClient`] - Type-safe, cloneable handle for sending requests
//! - [`LogSink`] - Injected logging capability
//! - [`FrameworkError`] - Mailbox and reply-channel failures
//!
//! # Testing
//!
//! See [`mock`] module for a recording log sink and a scripted mock host.

pub mod activation;
pub mod client;
pub mod error;
pub mod host;
pub mod log_sink;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use activation::{Activation, ActivationState};
pub use client::ActivationClient;
pub use error::FrameworkError;
pub use host::{ActivationHost, GrainId};
pub use log_sink::{emit, LogSink, TracingSink};
pub use message::{HostRequest, Response};
