//! Call surface of the Hello grain.
//!
//! These are the operations a host dispatches to a
//! [`HelloGrain`](crate::hello_actor::HelloGrain), one per turn, through
//! [`Activation::handle_call`](crate::framework::Activation::handle_call).

use crate::ticks::Tick;
use serde::{Deserialize, Serialize};

/// Calls accepted by an active Hello grain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HelloCall {
    /// Returns an acknowledgement embedding `greeting`.
    SayHello { greeting: String },
    /// Pushes `tick` into the grain's event stream.
    DoTick { tick: Tick },
    /// Schedules `count` ticks, one per tick interval.
    ///
    /// # Errors
    /// Fails with `InvalidArgument` if `count` is negative.
    ApplyDot { count: i32 },
}

/// Replies from HelloCalls - variants match 1:1 with HelloCall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HelloReply {
    Greeting(String),
    TickAccepted,
    DotApplied(String),
}
