//! # Hello Grain Demo
//!
//! Hosts one grain and drives it through its whole lifecycle:
//! activate, greet, push ticks directly, schedule timed ticks, deactivate.

use hello_grain::config::GrainConfig;
use hello_grain::framework::TracingSink;
use hello_grain::lifecycle::{setup_tracing, HelloSystem};
use std::sync::Arc;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = GrainConfig::from_env();
    info!(?config, "Starting hello grain demo");

    let system = HelloSystem::start("hello_1", Arc::new(TracingSink), config.clone())
        .await
        .map_err(|e| e.to_string())?;
    let client = &system.hello_client;

    let reply = client.say_hello("Good morning").await.map_err(|e| e.to_string())?;
    info!(%reply, "Greeting acknowledged");

    let span = tracing::info_span!("direct_ticks");
    async {
        for tick in [100, 200, 300] {
            client.do_tick(tick).await.map_err(|e| e.to_string())?;
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let reply = client.apply_dot(3).await.map_err(|e| e.to_string())?;
    info!(%reply, "Timer scheduled");

    // Long enough for the timer to finish
    tokio::time::sleep(config.tick_interval * 4).await;

    // This one is still running at shutdown and gets cancelled
    client.apply_dot(10).await.map_err(|e| e.to_string())?;
    tokio::time::sleep(config.tick_interval * 2).await;

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
