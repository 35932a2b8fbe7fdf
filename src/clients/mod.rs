//! Type-safe wrappers around [`ActivationClient`](crate::framework::ActivationClient).

pub mod hello_client;

pub use hello_client::*;
