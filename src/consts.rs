//! Constants used across the OOK frame protocol.
//!
//! This module defines the protocol-wide timing values, frame sizing and
//! default radio parameters used by the transmitter and the scheduler.
//!
//! ## Key Concepts
//!
//! - **Bit duration**: Every bit of every frame is held for the same time.
//! - **Trailing gap**: After each frame the line is held low for a fixed
//!   number of bit slots so the receiver sees a clean frame boundary.
//! - **Rotation interval**: The wall-clock period between pattern frames.
//! - **Capture unit**: The pulse quantum of raw captures, used when turning a
//!   recorded waveform back into frame bytes.
//!
//! These values are the defaults used by [`Config`](crate::config::Config)
//! and [`RadioConfig`](crate::radio::RadioConfig).

/// Time each encoded bit is held on the line, in microseconds.
///
/// 500 µs per bit gives the 2 kbit/s rate the accessory expects.
pub const BIT_DURATION_US: u32 = 500;

/// Number of bytes in every frame of the shipped pattern set.
pub const FRAME_LEN: usize = 12;

/// Number of bit slots the line is held low after each frame.
pub const TRAILING_GAP_BITS: u8 = 8;

/// Period between two pattern frames, in milliseconds.
pub const ROTATION_INTERVAL_MS: u32 = 2_000;

/// Coarse pause between scheduler iterations, in milliseconds.
///
/// This sits between frames, never inside one.
pub const LOOP_YIELD_MS: u32 = 10;

/// Step used by the busy-wait to hand the CPU back while polling, in nanoseconds.
pub const BUSY_WAIT_YIELD_NS: u32 = 1_000;

/// Length of one level unit in a raw pulse capture, in microseconds.
pub const CAPTURE_UNIT_US: u32 = 510;

/// Upper bound on the number of frames a [`PatternLibrary`](crate::pattern::PatternLibrary)
/// can hold without an allocator.
pub const MAX_PATTERNS: usize = 16;

/// Default carrier frequency, in MHz.
pub const RADIO_CARRIER_MHZ: f32 = 868.0;

/// Default FSK bit rate handed to the radio before switching to direct mode, in kbit/s.
pub const RADIO_BIT_RATE_KBPS: f32 = 4.8;

/// Default frequency deviation, in kHz. Zero keeps the carrier unmodulated.
pub const RADIO_FREQ_DEVIATION_KHZ: f32 = 0.0;

/// Default receiver bandwidth, in kHz.
pub const RADIO_RX_BANDWIDTH_KHZ: f32 = 20.0;

/// Default output power, in dBm.
pub const RADIO_POWER_DBM: i8 = 10;

/// Default preamble length, in bits.
pub const RADIO_PREAMBLE_BITS: u16 = 16;

/// Default TCXO reference voltage. Zero means no TCXO.
pub const RADIO_TCXO_VOLTAGE: f32 = 0.0;
