//! # Activation Client
//!
//! Generic client for sending lifecycle requests and calls to an
//! [`ActivationHost`](crate::framework::ActivationHost).

use crate::framework::{Activation, FrameworkError, HostRequest};
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with an `ActivationHost`.
///
/// Holds only the mailbox sender, so cloning is cheap. Every method sends one
/// request and waits for the host to answer it on a oneshot channel.
pub struct ActivationClient<A: Activation> {
    sender: mpsc::Sender<HostRequest<A>>,
}

impl<A: Activation> Clone for ActivationClient<A> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<A: Activation> ActivationClient<A> {
    pub fn new(sender: mpsc::Sender<HostRequest<A>>) -> Self {
        Self { sender }
    }

    pub async fn activate(&self) -> Result<(), A::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HostRequest::Activate { respond_to })
            .await
            .map_err(|_| FrameworkError::HostClosed)?;
        response.await.map_err(|_| FrameworkError::HostDropped)?
    }

    pub async fn call(&self, call: A::Call) -> Result<A::Reply, A::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HostRequest::Call { call, respond_to })
            .await
            .map_err(|_| FrameworkError::HostClosed)?;
        response.await.map_err(|_| FrameworkError::HostDropped)?
    }

    pub async fn deactivate(&self) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(HostRequest::Deactivate { respond_to })
            .await
            .map_err(|_| FrameworkError::HostClosed)?;
        response.await.map_err(|_| FrameworkError::HostDropped)
    }
}
