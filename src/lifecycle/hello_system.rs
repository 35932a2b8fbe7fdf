use crate::clients::HelloClient;
use crate::config::GrainConfig;
use crate::framework::{GrainId, LogSink};
use crate::hello_actor::GrainError;
use std::sync::Arc;
use tracing::{error, info, warn};

/// The runtime orchestrator for a single hosted Hello grain.
///
/// `HelloSystem` is responsible for:
/// - **Construction**: building the grain with its injected log sink and config
/// - **Hosting**: spawning the host's turn loop in its own Tokio task
/// - **Teardown**: deactivating the grain and waiting for the host to exit
///
/// # Example
///
/// ```ignore
/// let system = HelloSystem::start("hello_1", Arc::new(TracingSink), GrainConfig::default()).await?;
///
/// let reply = system.hello_client.say_hello("hi").await?;
/// system.hello_client.apply_dot(3).await?;
///
/// // Cancels outstanding timers before the grain is released
/// system.shutdown().await?;
/// ```
pub struct HelloSystem {
    /// Client for interacting with the grain
    pub hello_client: HelloClient,

    /// Task handle for the host loop (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl HelloSystem {
    /// Constructs the grain and spawns its host. The grain is not yet activated.
    pub fn new(id: impl Into<GrainId>, log: Arc<dyn LogSink>, config: GrainConfig) -> Self {
        let (host, hello_client) = crate::hello_actor::new(id, log, &config);
        let handle = tokio::spawn(host.run());
        Self {
            hello_client,
            handle,
        }
    }

    /// Constructs, spawns, and activates the grain.
    pub async fn start(
        id: impl Into<GrainId>,
        log: Arc<dyn LogSink>,
        config: GrainConfig,
    ) -> Result<Self, GrainError> {
        let system = Self::new(id, log, config);
        system.hello_client.activate().await?;
        Ok(system)
    }

    /// Gracefully shuts the grain down.
    ///
    /// This method:
    /// 1. Deactivates the grain, which stops every timer and closes its stream
    /// 2. Drops the client, which closes the host's mailbox
    /// 3. Waits for the host task to complete
    ///
    /// Other clones of the client keep the mailbox open; the host exits once the
    /// last one is dropped.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the host shut down cleanly
    /// - `Err(String)` if the host task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down grain...");

        // Teardown is idempotent, so a grain that was already deactivated is fine.
        if let Err(e) = self.hello_client.deactivate().await {
            warn!(error = %e, "Deactivate during shutdown failed");
        }
        drop(self.hello_client);

        if let Err(e) = self.handle.await {
            error!("Host task failed: {:?}", e);
            return Err(format!("Host task failed: {:?}", e));
        }

        info!("Grain shutdown complete.");
        Ok(())
    }
}
