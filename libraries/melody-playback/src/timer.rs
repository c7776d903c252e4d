//! Progress timer
//!
//! An explicitly owned repeating timer that drives [`PlaybackSession::tick`].
//! It is armed only while the host says so and is released on `disarm` or
//! drop, so no tick can outlive the session it belongs to.
//!
//! [`PlaybackSession::tick`]: crate::PlaybackSession::tick

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::trace;

enum TimerState {
    Disarmed,
    Armed {
        since: Instant,
        // Created lazily on first poll so arming works outside a runtime
        interval: Option<Interval>,
    },
}

/// Repeating one-shot-per-period timer with explicit arm/disarm
pub struct ProgressTimer {
    period: Duration,
    state: TimerState,
}

impl ProgressTimer {
    /// Create a disarmed timer
    ///
    /// A zero period is bumped to one millisecond.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            state: TimerState::Disarmed,
        }
    }

    /// Timer period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the timer is running
    pub fn is_armed(&self) -> bool {
        matches!(self.state, TimerState::Armed { .. })
    }

    /// Start the timer; the first tick fires one period from now
    ///
    /// Arming an armed timer keeps its current schedule.
    pub fn arm(&mut self) {
        if self.is_armed() {
            return;
        }
        trace!(period_ms = self.period.as_millis() as u64, "Progress timer armed");
        self.state = TimerState::Armed {
            since: Instant::now(),
            interval: None,
        };
    }

    /// Stop the timer, dropping any pending tick
    pub fn disarm(&mut self) {
        if self.is_armed() {
            trace!("Progress timer disarmed");
        }
        self.state = TimerState::Disarmed;
    }

    /// Wait for the next tick
    ///
    /// Pends forever while disarmed, which makes it safe to use as a
    /// `tokio::select!` branch.
    pub async fn tick(&mut self) {
        let period = self.period;
        match &mut self.state {
            TimerState::Disarmed => std::future::pending::<()>().await,
            TimerState::Armed { since, interval } => {
                let interval = interval.get_or_insert_with(|| {
                    let mut interval = interval_at(*since + period, period);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    interval
                });
                interval.tick().await;
            }
        }
    }
}
