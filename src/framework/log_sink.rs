//! # Log Sink
//!
//! The observational logging capability injected into an activation at
//! construction. The instance never reaches for a process-wide logger; it writes
//! `(level, message)` records to whatever sink its host handed it.

use std::panic::{self, AssertUnwindSafe};
use tracing::Level;

/// Accepts observational log records.
///
/// Implementations must not fail back into the caller: a sink that cannot write
/// drops the record.
pub trait LogSink: Send + Sync {
    fn log(&self, level: Level, message: &str);
}

/// Writes one record through `sink`.
///
/// A sink that panics loses the record; the panic stops here and never reaches
/// whoever is producing the value being logged.
pub fn emit(sink: &dyn LogSink, level: Level, message: &str) {
    if panic::catch_unwind(AssertUnwindSafe(|| sink.log(level, message))).is_err() {
        tracing::warn!(%level, "Log sink failed, record dropped");
    }
}

/// Production sink that forwards records to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!("{message}"),
            Level::WARN => tracing::warn!("{message}"),
            Level::INFO => tracing::info!("{message}"),
            Level::DEBUG => tracing::debug!("{message}"),
            _ => tracing::trace!("{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::RecordingSink;

    struct BrokenSink;

    impl LogSink for BrokenSink {
        fn log(&self, _level: Level, _message: &str) {
            panic!("sink unavailable");
        }
    }

    #[test]
    fn test_emit_forwards_record() {
        let sink = RecordingSink::new();
        emit(&sink, Level::WARN, "disk almost full");
        assert_eq!(sink.records(), vec![(Level::WARN, "disk almost full".to_string())]);
    }

    #[test]
    fn test_emit_contains_panicking_sink() {
        emit(&BrokenSink, Level::INFO, "dropped");
        emit(&BrokenSink, Level::INFO, "dropped again");
    }
}
