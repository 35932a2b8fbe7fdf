//! # Activation Host
//!
//! The `ActivationHost` owns one activation and its mailbox. It is the "server"
//! half of the pair returned by [`ActivationHost::new`]; the other half is an
//! [`ActivationClient`] that can be cloned and shared.
//!
//! **Concurrency Model**:
//! The host processes its mailbox in a single Tokio task, one request at a time.
//! That loop *is* the turn-based serialization the activation relies on: no two
//! calls ever run concurrently against the same instance, so the instance needs
//! no lock for its own state. Background work the instance spawns (timers) runs
//! outside this loop.

use crate::framework::{Activation, ActivationClient, HostRequest};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Opaque identity assigned by the host to the instance it owns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrainId(pub String);

impl std::fmt::Display for GrainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GrainId {
    fn from(s: &str) -> Self {
        GrainId(s.to_string())
    }
}

/// Hosts a single activation and dispatches its mailbox.
///
/// # Usage Pattern
///
/// 1.  **Construct**: build the instance with its dependencies.
/// 2.  **Create**: call `ActivationHost::new()` to get the host and its client.
/// 3.  **Run**: spawn `host.run()` in a background task.
/// 4.  **Drive**: `activate`, then calls, then `deactivate` through the client.
///
/// When every client is dropped the mailbox closes; the host then deactivates the
/// instance (a no-op if that already happened) and exits.
pub struct ActivationHost<A: Activation> {
    id: GrainId,
    receiver: mpsc::Receiver<HostRequest<A>>,
    activation: A,
}

impl<A: Activation> ActivationHost<A> {
    /// Creates a new host around `activation` and its client.
    ///
    /// # Arguments
    ///
    /// * `id` - identity of the hosted instance, used in log fields.
    /// * `buffer_size` - mailbox capacity. A full mailbox makes client calls wait.
    /// * `activation` - the constructed (not yet activated) instance.
    pub fn new(
        id: impl Into<GrainId>,
        buffer_size: usize,
        activation: A,
    ) -> (Self, ActivationClient<A>) {
        // tokio panics on a zero-capacity channel
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let host = Self {
            id: id.into(),
            receiver,
            activation,
        };
        (host, ActivationClient::new(sender))
    }

    /// Runs the dispatch loop until the mailbox closes.
    pub async fn run(mut self) {
        let grain = self.id.to_string();
        info!(%grain, "Host started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                HostRequest::Activate { respond_to } => {
                    debug!(%grain, "Activate");
                    let result = self.activation.on_activate().await;
                    match &result {
                        Ok(()) => info!(%grain, "Activated"),
                        Err(e) => warn!(%grain, error = %e, "Activate failed"),
                    }
                    let _ = respond_to.send(result);
                }
                HostRequest::Call { call, respond_to } => {
                    debug!(%grain, ?call, "Call");
                    let result = self.activation.handle_call(call).await;
                    match &result {
                        Ok(_) => debug!(%grain, "Call ok"),
                        Err(e) => warn!(%grain, error = %e, "Call failed"),
                    }
                    let _ = respond_to.send(result);
                }
                HostRequest::Deactivate { respond_to } => {
                    debug!(%grain, "Deactivate");
                    self.activation.on_deactivate().await;
                    info!(%grain, state = %self.activation.state(), "Deactivated");
                    let _ = respond_to.send(());
                }
            }
        }

        // Mailbox closed: make sure nothing the instance spawned outlives it.
        self.activation.on_deactivate().await;
        info!(%grain, state = %self.activation.state(), "Host shutdown");
    }
}
