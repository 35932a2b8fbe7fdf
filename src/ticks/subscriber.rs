//! The always-on consumer that logs every tick delivered to an activation.

use crate::framework::{emit, LogSink};
use crate::ticks::{EventStream, Subscription, Tick};
use std::sync::Arc;
use tracing::Level;

/// Stateless consumer writing one `info` record per tick.
///
/// Writing goes through the injected [`LogSink`]. A failing sink drops the
/// record; the push that delivered the tick still succeeds.
pub struct InternalLogSubscriber {
    sink: Arc<dyn LogSink>,
}

impl InternalLogSubscriber {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    pub fn on_tick(&self, tick: Tick) {
        emit(&*self.sink, Level::INFO, &format!("Tick received {tick}"));
    }

    /// Attaches this subscriber to `stream`, consuming it.
    pub fn attach(self, stream: &EventStream) -> Subscription {
        stream.subscribe(move |tick| self.on_tick(tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::RecordingSink;

    /// Panics on one specific tick, records everything else.
    struct FlakySink {
        fail_on: &'static str,
        inner: RecordingSink,
    }

    impl LogSink for FlakySink {
        fn log(&self, level: Level, message: &str) {
            if message == self.fail_on {
                panic!("sink unavailable");
            }
            self.inner.log(level, message);
        }
    }

    #[test]
    fn test_logs_each_tick_once() {
        let sink = RecordingSink::new();
        let stream = EventStream::new();
        let _sub = InternalLogSubscriber::new(Arc::new(sink.clone())).attach(&stream);

        stream.push(10).unwrap();
        stream.push(-4).unwrap();

        assert_eq!(
            sink.messages_with_prefix("Tick received"),
            vec!["Tick received 10", "Tick received -4"]
        );
        assert!(sink.records().iter().all(|(level, _)| *level == Level::INFO));
    }

    #[test]
    fn test_released_subscriber_stops_logging() {
        let sink = RecordingSink::new();
        let stream = EventStream::new();
        let mut sub = InternalLogSubscriber::new(Arc::new(sink.clone())).attach(&stream);

        stream.push(1).unwrap();
        sub.release();
        stream.push(2).unwrap();

        assert_eq!(sink.messages_with_prefix("Tick received"), vec!["Tick received 1"]);
    }

    #[test]
    fn test_sink_failure_does_not_reach_producer() {
        let recorded = RecordingSink::new();
        let sink = FlakySink {
            fail_on: "Tick received 1",
            inner: recorded.clone(),
        };
        let stream = EventStream::new();
        let _sub = InternalLogSubscriber::new(Arc::new(sink)).attach(&stream);

        assert_eq!(stream.push(1), Ok(()));
        assert_eq!(stream.push(2), Ok(()));
        assert_eq!(stream.push(1), Ok(()));
        assert_eq!(stream.push(3), Ok(()));

        assert_eq!(
            recorded.messages_with_prefix("Tick received"),
            vec!["Tick received 2", "Tick received 3"]
        );
    }
}
