//! # Event Stream
//!
//! In-memory broadcast channel of ticks owned by one activation.
//!
//! The stream is the single synchronization point between the call turn and the
//! background timers: every `push` takes the internal lock and delivers to all
//! attached consumers before releasing it, so values from one producer reach a
//! consumer in the order they were pushed and each value is delivered exactly
//! once. Consumers must not push into the stream they are attached to.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// A tick value flowing through the stream.
pub type Tick = i64;

/// Errors raised by the stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// A push arrived after the stream was closed. Teardown ordering guarantees
    /// this never happens, so observing it means a producer escaped cancellation.
    #[error("Event stream is closed")]
    Closed,
}

/// Identifies one attached consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Consumer = Box<dyn Fn(Tick) + Send + Sync>;

#[derive(Default)]
struct StreamInner {
    consumers: BTreeMap<SubscriptionId, Consumer>,
    next_id: u64,
    closed: bool,
}

/// Cloneable handle to a broadcast channel of ticks.
///
/// Clones share the same channel. The owning activation keeps one clone; timers
/// get producer clones.
#[derive(Clone, Default)]
pub struct EventStream {
    inner: Arc<Mutex<StreamInner>>,
}

impl std::fmt::Debug for EventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("EventStream")
            .field("consumers", &inner.consumers.len())
            .field("closed", &inner.closed)
            .finish()
    }
}

impl EventStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `value` to every attached consumer.
    pub fn push(&self, value: Tick) -> Result<(), StreamError> {
        let inner = self.lock();
        if inner.closed {
            return Err(StreamError::Closed);
        }
        for consumer in inner.consumers.values() {
            consumer(value);
        }
        Ok(())
    }

    /// Attaches `consumer`. The returned handle is the only way to detach it.
    pub fn subscribe<F>(&self, consumer: F) -> Subscription
    where
        F: Fn(Tick) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.consumers.insert(id, Box::new(consumer));
        debug!(subscription = id.0, consumers = inner.consumers.len(), "Subscribed");
        Subscription {
            stream: self.clone(),
            id: Some(id),
        }
    }

    /// Detaches the consumer behind `id`. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let removed = inner.consumers.remove(&id).is_some();
        if removed {
            debug!(subscription = id.0, consumers = inner.consumers.len(), "Unsubscribed");
        }
        removed
    }

    /// Closes the stream. Further pushes fail with [`StreamError::Closed`].
    /// Closing twice is a no-op.
    pub fn close(&self) {
        let mut inner = self.lock();
        if !inner.closed {
            inner.closed = true;
            debug!(consumers = inner.consumers.len(), "Stream closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().consumers.len()
    }

    fn lock(&self) -> MutexGuard<'_, StreamInner> {
        // A panicking consumer must not wedge every other producer.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Single-owner handle for one attached consumer.
///
/// Not `Clone`. Releasing is idempotent, and dropping the handle releases it,
/// so a consumer is detached exactly once no matter how teardown runs.
#[derive(Debug)]
pub struct Subscription {
    stream: EventStream,
    id: Option<SubscriptionId>,
}

impl Subscription {
    /// Detaches the consumer. Returns `true` only on the call that detached it.
    pub fn release(&mut self) -> bool {
        match self.id.take() {
            Some(id) => self.stream.unsubscribe(id),
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn id(&self) -> Option<SubscriptionId> {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector() -> (Arc<Mutex<Vec<Tick>>>, impl Fn(Tick) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |t| sink.lock().unwrap().push(t))
    }

    #[test]
    fn test_push_delivers_in_order() {
        let stream = EventStream::new();
        let (seen, consumer) = collector();
        let _sub = stream.subscribe(consumer);

        for t in [3, -1, i64::MAX, 0, i64::MIN] {
            stream.push(t).unwrap();
        }

        assert_eq!(*seen.lock().unwrap(), vec![3, -1, i64::MAX, 0, i64::MIN]);
    }

    #[test]
    fn test_push_reaches_every_consumer() {
        let stream = EventStream::new();
        let (a, ca) = collector();
        let (b, cb) = collector();
        let _sa = stream.subscribe(ca);
        let _sb = stream.subscribe(cb);

        stream.push(7).unwrap();

        assert_eq!(*a.lock().unwrap(), vec![7]);
        assert_eq!(*b.lock().unwrap(), vec![7]);
    }

    #[test]
    fn test_release_is_idempotent() {
        let stream = EventStream::new();
        let (seen, consumer) = collector();
        let mut sub = stream.subscribe(consumer);
        let id = sub.id().unwrap();

        assert!(sub.release());
        assert!(!sub.release());
        assert!(!stream.unsubscribe(id));
        assert!(!sub.is_active());
        assert_eq!(stream.subscriber_count(), 0);

        stream.push(1).unwrap();
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_drop_releases_subscription() {
        let stream = EventStream::new();
        let (_seen, consumer) = collector();
        {
            let _sub = stream.subscribe(consumer);
            assert_eq!(stream.subscriber_count(), 1);
        }
        assert_eq!(stream.subscriber_count(), 0);
    }

    #[test]
    fn test_push_after_close_is_rejected() {
        let stream = EventStream::new();
        let (seen, consumer) = collector();
        let _sub = stream.subscribe(consumer);

        stream.push(1).unwrap();
        stream.close();
        stream.close();

        assert!(stream.is_closed());
        assert_eq!(stream.push(2), Err(StreamError::Closed));
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_concurrent_producers_keep_per_source_order() {
        let stream = EventStream::new();
        let (seen, consumer) = collector();
        let _sub = stream.subscribe(consumer);

        let producers: Vec<_> = (0..4i64)
            .map(|p| {
                let stream = stream.clone();
                std::thread::spawn(move || {
                    for i in 0..250i64 {
                        stream.push(p * 1_000 + i).unwrap();
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1_000);
        for p in 0..4i64 {
            let from_p: Vec<_> = seen.iter().filter(|t| **t / 1_000 == p).copied().collect();
            let expected: Vec<_> = (0..250i64).map(|i| p * 1_000 + i).collect();
            assert_eq!(from_p, expected);
        }
    }
}
