use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;

use super::MonotonicClock;

/// Delays at or above this length sleep; shorter ones spin with `yield_now`.
const SLEEP_THRESHOLD_NS: u32 = 1_000_000;

/// [`MonotonicClock`] backed by `std::time::Instant`.
///
/// Time is counted from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    /// Starts a clock at zero.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for StdClock {
    fn now_us(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }
}

/// `DelayNs` for hosted targets.
///
/// Sub-millisecond delays spin on `Instant` and yield the thread between
/// polls, since `thread::sleep` overshoots by far more than a bit period.
/// Longer delays sleep.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        let duration = Duration::from_nanos(u64::from(ns));
        if ns >= SLEEP_THRESHOLD_NS {
            thread::sleep(duration);
            return;
        }
        let start = Instant::now();
        while start.elapsed() < duration {
            thread::yield_now();
        }
    }
}
