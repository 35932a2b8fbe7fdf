//! Tick plumbing owned by an activation: the stream, its logging consumer, and
//! the timers that feed it.

pub mod scheduler;
pub mod stream;
pub mod subscriber;

pub use scheduler::{TickScheduler, TimerHandle, TimerId};
pub use stream::{EventStream, StreamError, Subscription, SubscriptionId, Tick};
pub use subscriber::InternalLogSubscriber;
