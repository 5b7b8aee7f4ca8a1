//! Runtime timing configuration.
//!
//! All values are fixed for the lifetime of the process: build a [`Config`]
//! once at start-up, validate it, and hand it to the transmitter and the
//! scheduler.

use crate::consts::{BIT_DURATION_US, LOOP_YIELD_MS, ROTATION_INTERVAL_MS, TRAILING_GAP_BITS};
use crate::error::Error;

/// Timing parameters for the transmitter and the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Config {
    /// Time each bit is held on the line, in microseconds. Must be positive.
    pub bit_duration_us: u32,
    /// Bit slots the line is held low after every frame.
    pub trailing_gap_bits: u8,
    /// Period between pattern frames, in milliseconds. Must be positive.
    pub rotation_interval_ms: u32,
    /// Pause between scheduler iterations, in milliseconds.
    pub loop_yield_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bit_duration_us: BIT_DURATION_US,
            trailing_gap_bits: TRAILING_GAP_BITS,
            rotation_interval_ms: ROTATION_INTERVAL_MS,
            loop_yield_ms: LOOP_YIELD_MS,
        }
    }
}

impl Config {
    /// Checks the invariants the transmitter and scheduler rely on.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), Error> {
        if self.bit_duration_us == 0 {
            return Err(Error::InvalidConfig("bit_duration_us must be positive"));
        }
        if self.rotation_interval_ms == 0 {
            return Err(Error::InvalidConfig("rotation_interval_ms must be positive"));
        }
        Ok(())
    }
}
