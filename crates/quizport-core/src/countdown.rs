//! Cancellable one-second countdown source owned by the session actor.

use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Periodic tick source. Once cancelled, [`Countdown::tick`] never resolves.
#[derive(Debug)]
pub struct Countdown {
    interval: Option<Interval>,
}

impl Countdown {
    /// Start ticking; the first tick fires one `period` from now.
    pub fn start(period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + period, period);
        // Missed ticks fire immediately; remaining time tracks the wall clock.
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
        Self {
            interval: Some(interval),
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn cancel(&mut self) {
        if self.interval.take().is_some() {
            tracing::debug!("countdown cancelled");
        }
    }

    /// Wait for the next tick.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
