//! # System Lifecycle & Orchestration
//!
//! This module plays the hosting runtime for a single grain: it constructs the
//! grain with its dependencies, runs it, and tears it down.
//!
//! ## Construction and Dependency Injection
//!
//! Everything the grain needs is passed to its constructor: the [`LogSink`]
//! it writes observational records to, and the [`GrainConfig`] that sets the
//! tick interval and mailbox size. There is no ambient logger inside the grain.
//!
//! ## Graceful Shutdown
//!
//! [`HelloSystem::shutdown`] follows these steps:
//!
//! 1. **Deactivate** - cancels every ApplyDot timer and waits for each to exit,
//!    releases the log subscription, closes the tick stream
//! 2. **Drop the client** - closes the host's mailbox
//! 3. **Await the host** - the host loop exits once the mailbox drains
//!
//! Step 1 is what keeps timers from outliving the grain. If a caller drops every
//! client without deactivating, the host still deactivates the grain when its
//! mailbox closes.
//!
//! ## Observability & Tracing
//!
//! See the [`tracing`] module for [`setup_tracing`] and example output.
//!
//! [`LogSink`]: crate::framework::LogSink
//! [`GrainConfig`]: crate::config::GrainConfig

pub mod hello_system;
pub mod tracing;

pub use hello_system::*;
pub use self::tracing::setup_tracing;
