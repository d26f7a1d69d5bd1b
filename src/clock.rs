use std::time::Instant;

/// Source of the current instant for the stopwatch.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use super::Clock;

    /// A clock that only moves when told to.
    ///
    /// Clones share the same time, so a test can hold one handle while the
    /// stopwatch owns another.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        base: Instant,
        offset: Rc<Cell<Duration>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                // Far enough ahead that `now - elapsed` never underflows.
                base: Instant::now() + Duration::from_secs(24 * 60 * 60),
                offset: Rc::new(Cell::new(Duration::ZERO)),
            }
        }

        pub fn advance(&self, by: Duration) {
            self.offset.set(self.offset.get() + by);
        }

        /// Jump to an absolute offset from the clock's origin.
        pub fn set(&self, at: Duration) {
            self.offset.set(at);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.base + self.offset.get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let t0 = clock.now();
        handle.advance(Duration::from_secs(3));
        assert_eq!(clock.now() - t0, Duration::from_secs(3));
    }

    #[test]
    fn system_clock_does_not_go_backwards() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
