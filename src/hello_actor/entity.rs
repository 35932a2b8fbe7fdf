//! The Hello grain: an activation-scoped instance owning one tick stream.
//!
//! See [`HelloGrain`] for the lifecycle and teardown ordering.

use crate::config::GrainConfig;
use crate::framework::{emit, Activation, ActivationState, LogSink};
use crate::hello_actor::{GrainError, HelloCall, HelloReply};
use crate::ticks::{
    EventStream, InternalLogSubscriber, Subscription, Tick, TickScheduler, TimerHandle,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, Level};

/// Activation-scoped instance that greets callers and owns a stream of ticks.
///
/// # Ownership
/// The grain exclusively owns its [`EventStream`] and the [`Subscription`] of its
/// [`InternalLogSubscriber`]. Every timer spawned by `ApplyDot` is tracked by a
/// [`TimerHandle`] kept on the grain, so teardown can reach all of them.
///
/// # Teardown
/// [`HelloGrain::deactivate`] runs in this order:
/// 1. cancel every outstanding timer, then wait for each timer task to exit
/// 2. release the log subscription
/// 3. close the stream
///
/// so nothing can push into the stream once it is closed. Dropping the grain
/// without deactivating still cancels its timers and releases the subscription,
/// since both handles do that on drop.
pub struct HelloGrain {
    state: ActivationState,
    log: Arc<dyn LogSink>,
    stream: EventStream,
    subscription: Subscription,
    scheduler: TickScheduler,
    timers: Vec<TimerHandle>,
    tick_interval: Duration,
}

impl std::fmt::Debug for HelloGrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelloGrain")
            .field("state", &self.state)
            .field("stream", &self.stream)
            .field("timers", &self.timers.len())
            .field("tick_interval", &self.tick_interval)
            .finish()
    }
}

impl HelloGrain {
    /// Constructs the grain: allocates the stream and attaches the log subscriber.
    ///
    /// The grain starts in `Created` and accepts no calls until activated.
    pub fn new(log: Arc<dyn LogSink>, config: &GrainConfig) -> Self {
        let stream = EventStream::new();
        let subscription = InternalLogSubscriber::new(log.clone()).attach(&stream);
        Self {
            state: ActivationState::Created,
            log,
            stream,
            subscription,
            scheduler: TickScheduler::new(),
            timers: Vec::new(),
            tick_interval: config.tick_interval,
        }
    }

    pub fn state(&self) -> ActivationState {
        self.state
    }

    /// Timers registered and not yet finished.
    pub fn pending_timers(&self) -> usize {
        self.timers.iter().filter(|t| !t.is_finished()).count()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_active()
    }

    pub fn is_stream_closed(&self) -> bool {
        self.stream.is_closed()
    }

    pub fn activate(&mut self) -> Result<(), GrainError> {
        match self.state {
            ActivationState::Created => {}
            ActivationState::Active => return Err(GrainError::AlreadyActivated),
            state => return Err(GrainError::InvalidState { state }),
        }
        self.record("OnActivateAsync");
        self.transition(ActivationState::Active);
        Ok(())
    }

    pub fn say_hello(&self, greeting: &str) -> Result<String, GrainError> {
        self.ensure_active()?;
        self.record(&format!("SayHello message received: greeting = '{greeting}'"));
        Ok(format!(
            "Client said: '{greeting}', so HelloGrain says: Hello!"
        ))
    }

    pub fn do_tick(&self, tick: Tick) -> Result<(), GrainError> {
        self.ensure_active()?;
        self.stream.push(tick)?;
        Ok(())
    }

    /// Schedules `count` ticks and returns without waiting for them.
    pub fn apply_dot(&mut self, count: i32) -> Result<String, GrainError> {
        self.ensure_active()?;
        let ticks = u32::try_from(count).map_err(|_| {
            GrainError::InvalidArgument(format!("tick count must be non-negative, got {count}"))
        })?;
        self.record(&format!(
            "ApplyDot message received: number of ticks to process = {count}"
        ));

        self.timers.retain(|t| !t.is_finished());
        let handle = self
            .scheduler
            .schedule(self.tick_interval, ticks, self.stream.clone());
        debug!(timer = %handle.id(), pending = self.timers.len() + 1, "Registered timer");
        self.timers.push(handle);

        Ok(format!("Applying DoT with {count} ticks."))
    }

    /// Tears the grain down. Idempotent; teardown problems are logged, never returned.
    ///
    /// If this future is dropped before it completes, the grain stays
    /// `Deactivating` with every timer already cancelled, and the next call
    /// finishes the teardown.
    pub async fn deactivate(&mut self) {
        match self.state {
            ActivationState::Disposed => {
                debug!(state = %self.state, "Deactivate ignored");
                return;
            }
            ActivationState::Deactivating => debug!("Resuming interrupted teardown"),
            _ => self.transition(ActivationState::Deactivating),
        }

        for timer in &self.timers {
            self.scheduler.cancel(timer);
        }
        let cancelled = self.timers.len();
        for timer in &mut self.timers {
            timer.stop().await;
        }
        self.timers.clear();
        debug!(cancelled, "Timers stopped");

        if !self.subscription.release() {
            debug!("Log subscription already released");
        }
        self.stream.close();

        self.transition(ActivationState::Disposed);
        self.record("OnDeactivateAsync");
    }

    fn record(&self, message: &str) {
        emit(&*self.log, Level::INFO, message);
    }

    fn ensure_active(&self) -> Result<(), GrainError> {
        if self.state.can_invoke() {
            Ok(())
        } else {
            Err(GrainError::NotActive { state: self.state })
        }
    }

    fn transition(&mut self, next: ActivationState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "Transition");
        self.state = next;
    }
}

#[async_trait]
impl Activation for HelloGrain {
    type Call = HelloCall;
    type Reply = HelloReply;
    type Error = GrainError;

    fn state(&self) -> ActivationState {
        self.state
    }

    async fn on_activate(&mut self) -> Result<(), GrainError> {
        self.activate()
    }

    async fn handle_call(&mut self, call: HelloCall) -> Result<HelloReply, GrainError> {
        match call {
            HelloCall::SayHello { greeting } => self.say_hello(&greeting).map(HelloReply::Greeting),
            HelloCall::DoTick { tick } => self.do_tick(tick).map(|()| HelloReply::TickAccepted),
            HelloCall::ApplyDot { count } => self.apply_dot(count).map(HelloReply::DotApplied),
        }
    }

    async fn on_deactivate(&mut self) {
        self.deactivate().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::RecordingSink;
    use tokio::time;

    fn grain() -> (HelloGrain, RecordingSink) {
        let sink = RecordingSink::new();
        let grain = HelloGrain::new(Arc::new(sink.clone()), &GrainConfig::default());
        (grain, sink)
    }

    fn ticks(sink: &RecordingSink) -> Vec<String> {
        sink.messages_with_prefix("Tick received")
    }

    #[test]
    fn test_construct_subscribes_and_waits_for_activation() {
        let (grain, sink) = grain();
        assert_eq!(grain.state(), ActivationState::Created);
        assert!(grain.is_subscribed());
        assert!(!grain.is_stream_closed());
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_activate_once() {
        let (mut grain, sink) = grain();
        grain.activate().unwrap();
        assert_eq!(grain.state(), ActivationState::Active);
        assert!(sink.contains("OnActivateAsync"));

        assert_eq!(grain.activate(), Err(GrainError::AlreadyActivated));
    }

    #[tokio::test]
    async fn test_activate_after_deactivate_is_invalid() {
        let (mut grain, _sink) = grain();
        grain.activate().unwrap();
        grain.deactivate().await;
        assert_eq!(
            grain.activate(),
            Err(GrainError::InvalidState {
                state: ActivationState::Disposed
            })
        );
    }

    #[test]
    fn test_say_hello() {
        let (mut grain, sink) = grain();
        assert_eq!(
            grain.say_hello("hi"),
            Err(GrainError::NotActive {
                state: ActivationState::Created
            })
        );

        grain.activate().unwrap();
        let reply = grain.say_hello("hi").unwrap();
        assert_eq!(reply, "Client said: 'hi', so HelloGrain says: Hello!");
        assert!(sink.contains("greeting = 'hi'"));
    }

    #[test]
    fn test_do_tick_logs_each_value_in_order() {
        let (mut grain, sink) = grain();
        assert!(matches!(grain.do_tick(1), Err(GrainError::NotActive { .. })));

        grain.activate().unwrap();
        for t in [5, 0, -5, i64::MAX] {
            grain.do_tick(t).unwrap();
        }
        let expected: Vec<String> = [5, 0, -5, i64::MAX]
            .iter()
            .map(|t| format!("Tick received {t}"))
            .collect();
        assert_eq!(ticks(&sink), expected);
    }

    #[tokio::test]
    async fn test_apply_dot_rejects_negative_count() {
        let (mut grain, _sink) = grain();
        grain.activate().unwrap();

        let err = grain.apply_dot(-1).unwrap_err();
        assert!(matches!(err, GrainError::InvalidArgument(_)));
        assert_eq!(grain.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_dot_schedules_ticks_without_waiting() {
        let (mut grain, sink) = grain();
        grain.activate().unwrap();

        let reply = grain.apply_dot(3).unwrap();
        assert_eq!(reply, "Applying DoT with 3 ticks.");
        assert!(ticks(&sink).is_empty());
        assert_eq!(grain.pending_timers(), 1);

        time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(
            ticks(&sink),
            vec!["Tick received 0", "Tick received 1", "Tick received 2"]
        );
        assert_eq!(grain.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_dot_zero_schedules_nothing() {
        let (mut grain, sink) = grain();
        grain.activate().unwrap();

        assert_eq!(grain.apply_dot(0).unwrap(), "Applying DoT with 0 ticks.");
        time::sleep(Duration::from_secs(5)).await;
        assert!(ticks(&sink).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_timers_are_pruned() {
        let (mut grain, _sink) = grain();
        grain.activate().unwrap();

        grain.apply_dot(1).unwrap();
        grain.apply_dot(1).unwrap();
        time::sleep(Duration::from_secs(2)).await;
        grain.apply_dot(5).unwrap();

        assert_eq!(grain.timers.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deactivate_cancels_every_timer() {
        let (mut grain, sink) = grain();
        grain.activate().unwrap();

        grain.apply_dot(10).unwrap();
        grain.apply_dot(10).unwrap();
        time::sleep(Duration::from_millis(1_500)).await;
        let before = ticks(&sink).len();
        assert_eq!(before, 2);

        grain.deactivate().await;
        assert_eq!(grain.state(), ActivationState::Disposed);
        assert_eq!(grain.pending_timers(), 0);
        assert!(!grain.is_subscribed());
        assert!(grain.is_stream_closed());

        time::sleep(Duration::from_secs(20)).await;
        assert_eq!(ticks(&sink).len(), before);
    }

    #[tokio::test]
    async fn test_calls_after_deactivate_fail() {
        let (mut grain, _sink) = grain();
        grain.activate().unwrap();
        grain.deactivate().await;

        let not_active = GrainError::NotActive {
            state: ActivationState::Disposed,
        };
        assert_eq!(grain.say_hello("late"), Err(not_active.clone()));
        assert_eq!(grain.do_tick(1), Err(not_active.clone()));
        assert_eq!(grain.apply_dot(1), Err(not_active));
    }

    #[tokio::test]
    async fn test_deactivate_twice_tears_down_once() {
        let (mut grain, sink) = grain();
        grain.activate().unwrap();

        grain.deactivate().await;
        grain.deactivate().await;

        assert_eq!(sink.messages_with_prefix("OnDeactivateAsync").len(), 1);
        assert_eq!(grain.state(), ActivationState::Disposed);
    }

    #[tokio::test]
    async fn test_deactivate_never_activated_grain() {
        let (mut grain, _sink) = grain();
        grain.deactivate().await;
        assert_eq!(grain.state(), ActivationState::Disposed);
        assert!(!grain.is_subscribed());
        assert!(grain.is_stream_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_without_deactivate_stops_timers() {
        let (mut grain, sink) = grain();
        grain.activate().unwrap();
        grain.apply_dot(10).unwrap();
        drop(grain);

        time::sleep(Duration::from_secs(20)).await;
        assert!(ticks(&sink).is_empty());
    }

    #[tokio::test]
    async fn test_interrupted_deactivate_resumes_on_retry() {
        let (mut grain, sink) = grain();
        grain.activate().unwrap();
        grain.apply_dot(10).unwrap();

        // Poll once: the timer task has not run yet, so teardown parks on it.
        {
            let mut teardown = Box::pin(grain.deactivate());
            tokio::select! {
                biased;
                _ = &mut teardown => panic!("teardown should wait for the timer task"),
                _ = std::future::ready(()) => {}
            }
        }
        assert_eq!(grain.state(), ActivationState::Deactivating);
        assert!(!grain.is_stream_closed());

        grain.deactivate().await;
        assert_eq!(grain.state(), ActivationState::Disposed);
        assert_eq!(grain.pending_timers(), 0);
        assert!(!grain.is_subscribed());
        assert!(grain.is_stream_closed());
        assert_eq!(sink.messages_with_prefix("OnDeactivateAsync").len(), 1);

        grain.deactivate().await;
        assert_eq!(sink.messages_with_prefix("OnDeactivateAsync").len(), 1);
    }
}
