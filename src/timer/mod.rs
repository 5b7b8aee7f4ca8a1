//! Bit timing for the OOK transmitter.
//!
//! A direct-mode radio emits whatever level sits on its data pin, so the
//! receiver only stays in sync if every bit is held for the same time. OS
//! sleeps with millisecond granularity cannot hold a 500 µs bit, so the
//! [`BitTimer`] busy-waits: it polls a [`MonotonicClock`] and hands the CPU
//! back in 1 µs steps through an `embedded_hal::delay::DelayNs` provider
//! until the requested duration has elapsed.
//!
//! Contains:
//! - [`MonotonicClock`]: microsecond time source supplied by the platform
//! - [`BitTimer`]: polling busy-wait plus the coarse inter-frame pause
//! - [`bit_duration_us`] / [`frame_duration_us`]: timing calculators
//! - `StdClock` and `StdDelay` (feature `std`): host implementations
//!
//! Common rates: (For use with `bit_duration_us`)
//!
//! | Bit rate   | Bit duration |
//! |------------|--------------|
//! |  1000 bps  |      1000 µs |
//! |  2000 bps  |       500 µs |
//! |  4000 bps  |       250 µs |

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use libm::round;

use crate::consts::BUSY_WAIT_YIELD_NS;

#[cfg(feature = "std")]
mod host;
#[cfg(feature = "std")]
pub use host::*;

/// 2 kilobits / second == 2000 bits / second
pub const BITS_PER_SECOND: u32 = 2_000;
/// 1,000,000 microseconds = 1 second
pub const MICROSECONDS_PER_SECOND: u32 = 1_000_000;

/// A monotonic microsecond time source.
///
/// Implementations must never go backwards. Wrapping is tolerated: elapsed
/// times are computed with wrapping subtraction.
pub trait MonotonicClock {
    /// Microseconds since an arbitrary, fixed origin.
    fn now_us(&self) -> u64;

    /// Milliseconds since the same origin as [`now_us`](MonotonicClock::now_us).
    fn now_ms(&self) -> u64 {
        self.now_us() / 1_000
    }
}

/// Busy-waiting bit timer.
///
/// Owns the platform clock and delay provider. Each wait is measured from
/// its own start instant, so rounding error never accumulates across bits.
#[derive(Debug)]
pub struct BitTimer<C, D> {
    clock: C,
    delay: D,
}

impl<C, D> BitTimer<C, D>
where
    C: MonotonicClock,
    D: DelayNs,
{
    /// Creates a timer from a clock and a delay provider.
    pub fn new(clock: C, delay: D) -> Self {
        Self { clock, delay }
    }

    /// Current time, in microseconds.
    pub fn now_us(&self) -> u64 {
        self.clock.now_us()
    }

    /// Current time, in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Checks whether `duration_us` has elapsed since `start_us`.
    ///
    /// Returns `WouldBlock` until the deadline passes.
    pub fn poll_elapsed(&self, start_us: u64, duration_us: u32) -> nb::Result<(), Infallible> {
        if self.clock.now_us().wrapping_sub(start_us) >= u64::from(duration_us) {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    /// Blocks until `duration_us` has elapsed since `start_us`.
    ///
    /// Yields in [`BUSY_WAIT_YIELD_NS`] steps while polling.
    pub fn wait_from(&mut self, start_us: u64, duration_us: u32) {
        loop {
            match self.poll_elapsed(start_us, duration_us) {
                Ok(()) => return,
                Err(nb::Error::WouldBlock) => self.delay.delay_ns(BUSY_WAIT_YIELD_NS),
                Err(nb::Error::Other(never)) => match never {},
            }
        }
    }

    /// Blocks for `duration_us`, measured from now.
    pub fn wait_us(&mut self, duration_us: u32) {
        let start = self.now_us();
        self.wait_from(start, duration_us);
    }

    /// Coarse pause between frames. Never use this inside a frame.
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Gives back the clock and delay provider.
    pub fn release(self) -> (C, D) {
        (self.clock, self.delay)
    }
}

/// Computes the bit duration for a bit rate, rounded to the nearest microsecond.
///
/// # Arguments
/// - `bits_per_second`: line rate (e.g., 2000.0)
///
/// # Returns
/// - Bit duration in microseconds, or 0 for a non-positive rate
pub fn bit_duration_us(bits_per_second: f32) -> u32 {
    if !(bits_per_second > 0.0) {
        return 0;
    }
    round(f64::from(MICROSECONDS_PER_SECOND) / f64::from(bits_per_second)) as u32
}

/// Wall-clock length of one transmission, in microseconds.
///
/// # Arguments
/// - `frame_len`: bytes in the frame
/// - `bit_duration_us`: time per bit
/// - `gap_bits`: quiet bit slots appended after the frame
pub const fn frame_duration_us(frame_len: usize, bit_duration_us: u32, gap_bits: u8) -> u64 {
    (frame_len as u64 * 8 + gap_bits as u64) * bit_duration_us as u64
}
