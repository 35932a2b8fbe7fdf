//! # Hello Grain
//!
//! > **An activation-scoped actor that owns its event stream and every producer feeding it.**
//!
//! A grain is a single logical instance that a host constructs, activates, feeds
//! one call at a time, and finally deactivates. This crate's grain keeps one
//! internal stream of ticks, fed both by direct calls and by background timers
//! it schedules itself, and guarantees that every one of those timers is stopped
//! before the stream closes and the instance is released.
//!
//! ## 🚀 Core Concepts
//!
//! ### Turns and Background Work
//! The host dispatches calls from a mailbox in a single task, so the grain never
//! sees two calls at once and keeps its own state without locks. Timers run in
//! their own tasks; they only ever touch the [`EventStream`](ticks::EventStream),
//! which is the one lock-protected structure in the design.
//!
//! ### Teardown Ordering
//! Deactivation cancels every timer and waits for each to exit, releases the log
//! subscription, then closes the stream. A push into a closed stream is therefore
//! impossible by construction; it would surface as
//! [`StreamError::Closed`](ticks::StreamError::Closed) if ordering were ever broken.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The hosting contract and plumbing.
//! - **Key items**: [`Activation`](framework::Activation), [`ActivationHost`](framework::ActivationHost),
//!   [`LogSink`](framework::LogSink).
//!
//! ### 2. The Stream ([`ticks`])
//! - **Key items**: [`EventStream`](ticks::EventStream), [`TickScheduler`](ticks::TickScheduler),
//!   [`InternalLogSubscriber`](ticks::InternalLogSubscriber).
//!
//! ### 3. The Grain ([`hello_actor`])
//! - **Key items**: [`HelloGrain`](hello_actor::HelloGrain), [`GrainError`](hello_actor::GrainError).
//!
//! ### 4. The Interface ([`clients`]) and Orchestrator ([`lifecycle`])
//! - **Key items**: [`HelloClient`](clients::HelloClient), [`HelloSystem`](lifecycle::HelloSystem).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Faster ticks
//! HELLO_GRAIN_TICK_INTERVAL_MS=200 RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod config;
pub mod framework;
pub mod hello_actor;
pub mod lifecycle;
pub mod ticks;
