//! # Tick Scheduler
//!
//! Spawns background timers that push a bounded, evenly spaced sequence of ticks
//! into an [`EventStream`].
//!
//! Each timer runs in its own Tokio task, outside the activation's call turn.
//! A timer emits `0, 1, .., count - 1`, the first value one interval after it was
//! scheduled. Emissions of one timer are strictly sequential; nothing orders them
//! against other timers or against direct pushes.

use crate::ticks::{EventStream, Tick};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const MIN_INTERVAL: Duration = Duration::from_millis(1);
const MAX_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer_{}", self.0)
    }
}

/// Cancel-capable handle to one in-flight timer.
///
/// Dropping the handle cancels the timer.
#[derive(Debug)]
pub struct TimerHandle {
    id: TimerId,
    count: u32,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Number of ticks the timer was scheduled to emit.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Stops further emissions. Idempotent; a no-op on a finished timer.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the timer task has exited (completed, cancelled, or stopped).
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Cancels the timer and waits until its task has exited.
    ///
    /// Once this returns the timer can no longer push. Calling it again is a no-op.
    /// If the returned future is dropped early, the task is still tracked and a
    /// later `stop` waits for it.
    pub async fn stop(&mut self) {
        self.cancel();
        let Some(task) = self.task.as_mut() else {
            return;
        };
        let result = task.await;
        self.task = None;
        match result {
            Ok(()) => debug!(timer = %self.id, "Timer stopped"),
            Err(e) if e.is_cancelled() => debug!(timer = %self.id, "Timer aborted"),
            Err(e) => warn!(timer = %self.id, error = %e, "Timer task failed"),
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Creates timers feeding an [`EventStream`].
#[derive(Debug, Default)]
pub struct TickScheduler {
    next_id: AtomicU64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a timer emitting `count` ticks into `sink`, one per `interval`.
    ///
    /// Must be called from within a Tokio runtime. Returns immediately.
    pub fn schedule(&self, interval: Duration, count: u32, sink: EventStream) -> TimerHandle {
        let id = TimerId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        // tokio panics on a zero period, and Instant arithmetic overflows near Duration::MAX
        let interval = interval.clamp(MIN_INTERVAL, MAX_INTERVAL);
        let token = CancellationToken::new();
        debug!(timer = %id, count, ?interval, "Timer scheduled");

        let task = tokio::spawn(run_timer(id, interval, count, sink, token.clone()));

        TimerHandle {
            id,
            count,
            token,
            task: Some(task),
        }
    }

    /// Cancels `handle`. Safe after natural completion and when repeated.
    pub fn cancel(&self, handle: &TimerHandle) {
        handle.cancel();
    }
}

async fn run_timer(
    id: TimerId,
    interval: Duration,
    count: u32,
    sink: EventStream,
    token: CancellationToken,
) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    for seq in 0..Tick::from(count) {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(timer = %id, emitted = seq, "Timer cancelled");
                return;
            }
            _ = ticker.tick() => {}
        }
        if token.is_cancelled() {
            debug!(timer = %id, emitted = seq, "Timer cancelled");
            return;
        }
        if let Err(e) = sink.push(seq) {
            warn!(timer = %id, emitted = seq, error = %e, "Timer outlived its stream");
            return;
        }
    }
    debug!(timer = %id, count, "Timer completed");
}
