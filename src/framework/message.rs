//! # Host Messages
//!
//! Message types exchanged between an [`ActivationClient`](crate::framework::ActivationClient)
//! and an [`ActivationHost`](crate::framework::ActivationHost).

use crate::framework::Activation;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the host.
pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

/// Request delivered to the host's mailbox. Each request is one turn.
///
/// The variants map onto the lifecycle contract:
/// - **Activate**: run [`Activation::on_activate`].
/// - **Call**: run [`Activation::handle_call`] with a grain-specific payload.
/// - **Deactivate**: run [`Activation::on_deactivate`]. Always succeeds.
#[derive(Debug)]
pub enum HostRequest<A: Activation> {
    Activate {
        respond_to: Response<(), A::Error>,
    },
    Call {
        call: A::Call,
        respond_to: Response<A::Reply, A::Error>,
    },
    Deactivate {
        respond_to: oneshot::Sender<()>,
    },
}
