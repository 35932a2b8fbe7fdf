//! # Framework Errors
//!
//! Errors raised by the hosting plumbing itself (mailbox and reply channels),
//! as opposed to errors raised by the grain's own call handlers.

/// Errors that can occur within the activation host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    /// The host's mailbox is closed; the host task has exited.
    #[error("Activation host closed")]
    HostClosed,
    /// The host dropped the reply channel without answering.
    #[error("Activation host dropped response channel")]
    HostDropped,
    /// The host answered with a reply that does not belong to the request.
    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),
}
