//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging for a process
//! hosting grains. Libraries never call it; binaries call it once at startup.
//!
//! ## What Gets Traced
//!
//! - **Host Lifecycle**: startup, activation, deactivation, shutdown
//! - **Calls**: every dispatched call (`debug`), failures (`warn`)
//! - **Timers**: scheduling, cancellation and completion (`debug`)
//! - **Grain records**: whatever the grain writes to its
//!   [`TracingSink`](crate::framework::TracingSink), e.g. `Tick received 3`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Grain records and lifecycle only
//! RUST_LOG=info cargo run
//!
//! # Calls, transitions and timer events
//! RUST_LOG=debug cargo run
//!
//! # Filter to the tick plumbing
//! RUST_LOG=hello_grain::ticks=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Host started grain=hello_1
//! INFO OnActivateAsync
//! INFO Activated grain=hello_1
//! INFO say_hello: SayHello message received: greeting = 'hi'
//! INFO ApplyDot message received: number of ticks to process = 3
//! INFO Tick received 0
//! INFO Tick received 1
//! INFO Tick received 2
//! INFO OnDeactivateAsync
//! INFO Deactivated grain=hello_1 state=disposed
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - the grain field identifies the source
        .compact() // Compact format shows spans inline (e.g., "say_hello: ...")
        .init();
}
