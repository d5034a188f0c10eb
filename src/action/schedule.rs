//! The periodic gate deciding whether a control law runs on a given tick.

use std::time::{Duration, Instant};

/// Fixed-period gate.
///
/// `poll` is cheap and never blocks: it either reports the elapsed time since
/// the last run (and starts a new period) or reports nothing.
#[derive(Clone, Copy, Debug)]
pub struct Schedule {
    period: Duration,
    last_run: Instant,
}

impl Schedule {
    /// Create a gate whose first period starts at `started`.
    pub fn new(period: Duration, started: Instant) -> Self {
        Self {
            period,
            last_run: started,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Instant of the last run, or of construction before the first run.
    pub fn last_run(&self) -> Instant {
        self.last_run
    }

    /// Time elapsed at `now` since the last run.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_run)
    }

    /// Returns the elapsed seconds and restarts the period if at least one full
    /// period has passed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<f64> {
        let elapsed = self.elapsed(now);
        if elapsed < self.period {
            return None;
        }
        self.last_run = now;
        Some(elapsed.as_secs_f64())
    }
}
