//! # Hello Grain
//!
//! An activation-scoped instance with a persistent internal tick stream.
//!
//! ## Overview
//!
//! The grain greets callers, accepts ticks directly (`DoTick`), and schedules
//! background timers that feed more ticks into the same stream (`ApplyDot`).
//! Every tick is logged by an always-on internal subscriber.
//!
//! ## Structure
//!
//! - [`entity`] - [`HelloGrain`] and its [`Activation`](crate::framework::Activation) implementation
//! - [`calls`] - [`HelloCall`] and [`HelloReply`], the call surface
//! - [`error`] - [`GrainError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the host and client
//!
//! ## Usage
//!
//! ```rust
//! use hello_grain::config::GrainConfig;
//! use hello_grain::framework::TracingSink;
//! use hello_grain::hello_actor;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (host, client) = hello_actor::new("hello_1", Arc::new(TracingSink), &GrainConfig::default());
//!     let task = tokio::spawn(host.run());
//!
//!     client.activate().await?;
//!     let reply = client.say_hello("hi").await?;
//!     assert!(reply.contains("'hi'"));
//!     client.deactivate().await?;
//!
//!     drop(client);
//!     task.await?;
//!     Ok(())
//! }
//! ```

pub mod calls;
pub mod entity;
pub mod error;

pub use calls::*;
pub use entity::*;
pub use error::*;

use crate::clients::HelloClient;
use crate::config::GrainConfig;
use crate::framework::{ActivationHost, GrainId, LogSink};
use std::sync::Arc;

/// Constructs a Hello grain and wraps it in a host and client.
///
/// The grain is in `Created`; spawn `host.run()` and call `activate` before use.
pub fn new(
    id: impl Into<GrainId>,
    log: Arc<dyn LogSink>,
    config: &GrainConfig,
) -> (ActivationHost<HelloGrain>, HelloClient) {
    let grain = HelloGrain::new(log, config);
    let (host, generic_client) = ActivationHost::new(id, config.mailbox_capacity, grain);
    (host, HelloClient::new(generic_client))
}
