//! Conversion of raw pulse captures into frames.
//!
//! Sub-GHz capture tools record a signal as signed durations in
//! microseconds: positive for carrier on, negative for carrier off, e.g.
//!
//! ```text
//! RAW_Data: 1020 -2040 510
//! ```
//!
//! Each duration is rounded to a whole number of
//! [`CAPTURE_UNIT_US`](crate::consts::CAPTURE_UNIT_US) units and expanded to
//! that many bits of the same level. The bits are packed MSB first and the
//! frame is zero-padded to its full length, which keys the carrier off for
//! the tail. Durations round to the nearest unit (half away from zero)
//! rather than truncating, so a pulse a little short of a whole unit still
//! counts:
//!
//! ```rust
//! use ook868::capture::from_raw_data;
//! use ook868::consts::CAPTURE_UNIT_US;
//! use ook868::frame::Frame;
//!
//! // 2 units on, 4 off, 1 on: 1100001 -> 0xc2
//! let frame: Frame<2> = from_raw_data("RAW_Data: 1020 -2040 510", CAPTURE_UNIT_US).unwrap();
//! assert_eq!(frame.as_bytes(), &[0xc2, 0x00]);
//! ```

use libm::round;

use crate::error::Error;
use crate::frame::Frame;

const RAW_DATA_PREFIX: &str = "RAW_Data:";

/// Converts signed pulse durations into a frame.
///
/// # Errors
/// - [`Error::InvalidConfig`] if `unit_us` is zero
/// - [`Error::MalformedCapture`] if `pulses` is empty
/// - [`Error::CaptureTooLong`] if the pulses expand past `8 × N` bits
pub fn pulses_to_frame<const N: usize>(pulses: &[i32], unit_us: u32) -> Result<Frame<N>, Error> {
    pack(pulses.iter().map(|&p| Ok(p)), unit_us)
}

/// Parses one `RAW_Data:` line (the prefix is optional) and converts it
/// into a frame.
///
/// # Errors
/// As [`pulses_to_frame`], plus [`Error::MalformedCapture`] if a sample is
/// not a signed integer.
pub fn from_raw_data<const N: usize>(line: &str, unit_us: u32) -> Result<Frame<N>, Error> {
    let line = line.trim();
    let body = line.strip_prefix(RAW_DATA_PREFIX).unwrap_or(line);
    pack(
        body.split_whitespace()
            .map(|s| s.parse::<i32>().map_err(|_| Error::MalformedCapture)),
        unit_us,
    )
}

/// Number of bits a single pulse expands to.
fn units(pulse: i32, unit_us: u32) -> usize {
    round(f64::from(pulse.unsigned_abs()) / f64::from(unit_us)) as usize
}

fn pack<const N: usize, I>(samples: I, unit_us: u32) -> Result<Frame<N>, Error>
where
    I: Iterator<Item = Result<i32, Error>> + Clone,
{
    if unit_us == 0 {
        return Err(Error::InvalidConfig("capture unit must be positive"));
    }

    // Validate and size in one pass, fill in a second. The fill never runs
    // past `capacity` bits.
    let mut bits = 0usize;
    let mut samples_seen = 0usize;
    for sample in samples.clone() {
        bits = bits.saturating_add(units(sample?, unit_us));
        samples_seen += 1;
    }
    if samples_seen == 0 {
        return Err(Error::MalformedCapture);
    }
    let capacity = N * 8;
    if bits > capacity {
        return Err(Error::CaptureTooLong { bits, capacity });
    }

    let mut bytes = [0u8; N];
    let mut cursor = 0usize;
    for sample in samples {
        let pulse = sample?;
        let count = units(pulse, unit_us);
        if pulse > 0 {
            for bit in cursor..cursor + count {
                bytes[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        cursor += count;
    }
    trace!("capture: {} bits packed into {} bytes", bits, N);
    Ok(Frame::new(bytes))
}
