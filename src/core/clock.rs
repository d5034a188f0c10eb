//! Time sources for the scheduling gate.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic instants.
///
/// Actions ask their clock for "now" once per `update()` call. Production code
/// uses [`SystemClock`]; tests and simulations drive a [`ManualClock`].
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same timeline, so one handle can be given to every action
/// while the driver keeps another to advance time.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use tickwise::core::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// let start = handle.now();
///
/// clock.advance(Duration::from_millis(20));
/// assert_eq!(handle.now() - start, Duration::from_millis(20));
/// ```
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Move time forward for every clone of this clock.
    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    /// Time advanced since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}

impl<K: Clock + ?Sized> Clock for Rc<K> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
