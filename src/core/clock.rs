use std::time::{Duration, Instant};

/// Source of time for the countdown loop.
///
/// The run loop only ever reads the time and sleeps, so tests can swap in a
/// simulated clock and run an hour-long countdown instantly.
pub trait Clock {
    fn now(&self) -> Instant;

    /// Blocks for `period`. Not interruptible.
    fn sleep(&self, period: Duration);
}

/// Wall clock backed by `Instant::now()` and `thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, period: Duration) {
        std::thread::sleep(period);
    }
}
