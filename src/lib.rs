//! # ook868
//!
//! A portable, no_std Rust transmitter for On-Off Keyed (OOK) frames on a direct-mode
//! sub-GHz radio, such as an SX1262 with its DIO2 line keying the carrier at 868 MHz.
//!
//! The radio is configured once for an unmodulated carrier and switched to direct mode.
//! From then on every bit is bit-banged onto a GPIO: `HIGH` keys the carrier on, `LOW`
//! keys it off. This crate provides:
//! - `embedded-hal` traits for the data line and timing
//! - a busy-waiting bit timer that holds each bit for exactly one bit period
//! - a frame transmitter and a scheduler that rotates effect patterns on a fixed interval
//! - a stop token shared with interrupt handlers through `critical-section`
//!
//! ## Crate features
//! | Feature     | Description |
//! |-------------|-------------|
//! | `std`       | Disables `#![no_std]`, replaces `heapless::Vec`s with `std::vec::Vec`s and adds host clock and delay types |
//! | `defmt-0-3` | Uses `defmt` logging |
//! | `log`       | Uses `log` logging |
//!
//! ## Wire format
//!
//! - Frames are fixed-length byte strings, 12 bytes by default
//! - Bits are sent MSB first, 500 µs per bit (2 kbps)
//! - After each frame the line is held low for 8 bit periods
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ook868::config::Config;
//! use ook868::driver::FrameTransmitter;
//! use ook868::pattern::PatternLibrary;
//! use ook868::radio::{RadioConfig, bring_up};
//! use ook868::scheduler::TransmissionScheduler;
//! use ook868::stop::StopToken;
//! use ook868::timer::BitTimer;
//!
//! static STOP: StopToken = StopToken::new();
//!
//! bring_up(&mut radio, &RadioConfig::default())?;
//!
//! let config = Config::default();
//! let timer = BitTimer::new(clock, delay);
//! let tx = FrameTransmitter::new(dio2_pin, timer, &config)?;
//! let mut scheduler = TransmissionScheduler::new(tx, PatternLibrary::default(), &config)?;
//! scheduler.run(&STOP)?;
//! ```
//!
//! ## Integration Notes
//!
//! - Timing precision is critical; the thread running the scheduler is fully busy while
//!   a frame is on the air
//! - Only one transmitter may own the data line
//! - A pin fault is fatal: the scheduler stops and reports [`Error::HardwareFault`]
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
mod fmt;

pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

pub mod capture;
pub mod config;
pub mod consts;
pub mod driver;
pub mod encoding;
pub mod error;
pub mod frame;
pub mod line;
pub mod pattern;
pub mod radio;
pub mod scheduler;
pub mod stop;
pub mod timer;

#[cfg(test)]
mod testing;

pub use error::{Error, RadioError};
