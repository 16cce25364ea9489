//! Periodic tick source for driving a run from async code.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Fires once per period. The first tick comes one full period after
/// creation, not immediately.
///
/// Missed ticks are delayed rather than bursted, so a host that stalls
/// (suspended process, slow terminal) gets one tick per `next()` and the
/// run never tries to catch up with wall-clock time.
#[derive(Debug)]
pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        let period = if period.is_zero() {
            DEFAULT_TICK_INTERVAL
        } else {
            period
        };
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }

    pub async fn next(&mut self) {
        self.interval.tick().await;
    }

    /// Restart the period from now, e.g. after a resume.
    pub fn reset(&mut self) {
        self.interval.reset();
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}
