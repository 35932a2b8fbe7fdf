//! # Configuration
//!
//! Tunables for hosting a grain. Defaults match production behavior (one tick per
//! second). Hosts may deserialize this from their own config format or read it
//! from the environment with [`GrainConfig::from_env`].

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Environment variable overriding [`GrainConfig::mailbox_capacity`].
pub const ENV_MAILBOX_CAPACITY: &str = "HELLO_GRAIN_MAILBOX_CAPACITY";
/// Environment variable overriding [`GrainConfig::tick_interval`], in milliseconds.
pub const ENV_TICK_INTERVAL_MS: &str = "HELLO_GRAIN_TICK_INTERVAL_MS";

const DEFAULT_MAILBOX_CAPACITY: usize = 32;
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrainConfig {
    /// Capacity of the host's mailbox.
    pub mailbox_capacity: usize,
    /// Spacing between ticks emitted by an ApplyDot timer.
    pub tick_interval: Duration,
}

impl Default for GrainConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl GrainConfig {
    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity.max(1);
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Defaults overridden by the `HELLO_GRAIN_*` environment variables.
    ///
    /// Malformed or zero values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MAILBOX_CAPACITY) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.mailbox_capacity = n,
                _ => warn!(key = ENV_MAILBOX_CAPACITY, value = %raw, "Ignoring invalid value"),
            }
        }
        if let Some(raw) = lookup(ENV_TICK_INTERVAL_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.tick_interval = Duration::from_millis(ms),
                _ => warn!(key = ENV_TICK_INTERVAL_MS, value = %raw, "Ignoring invalid value"),
            }
        }

        config
    }
}
