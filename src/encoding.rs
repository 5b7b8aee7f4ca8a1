//! Bit-level expansion of frames for On-Off Keying.
//!
//! This module turns a [`Frame`] into the ordered sequence of line levels
//! that is keyed onto the radio's direct-mode input. There is no line code:
//! a `1` bit holds the carrier on ([`BitLevel::High`]) for one bit period and
//! a `0` bit holds it off ([`BitLevel::Low`]).
//!
//! ## Bit Order
//!
//! Bits are emitted most-significant first, starting with byte 0 and
//! proceeding byte by byte, so `0xAA` goes out as
//! `High, Low, High, Low, High, Low, High, Low`.
//!
//! ## Purity
//!
//! [`encode`] copies the frame into the returned iterator. Walking the
//! iterator never touches the caller's frame, and encoding the same frame
//! twice yields the same sequence.
//!
//! ```rust
//! use ook868::encoding::{encode, BitLevel};
//! use ook868::frame::Frame;
//!
//! let frame = Frame::new([0xa5]);
//! let levels: Vec<BitLevel> = encode(&frame).collect();
//! assert_eq!(levels[0], BitLevel::High);
//! assert_eq!(levels[1], BitLevel::Low);
//! assert_eq!(levels.len(), 8);
//! ```

use core::iter::FusedIterator;

use crate::frame::Frame;

/// Logic level of the keyed line for one bit period.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum BitLevel {
    /// Carrier on.
    High,
    /// Carrier off.
    Low,
}

impl BitLevel {
    /// Whether this level keys the carrier on.
    pub const fn is_high(self) -> bool {
        matches!(self, BitLevel::High)
    }
}

impl From<bool> for BitLevel {
    fn from(bit: bool) -> Self {
        if bit { BitLevel::High } else { BitLevel::Low }
    }
}

impl From<BitLevel> for bool {
    fn from(level: BitLevel) -> Self {
        level.is_high()
    }
}

/// Lazy sequence of [`BitLevel`]s for one frame.
///
/// Holds a private copy of the frame bytes and a bit cursor.
#[derive(Clone, Debug)]
pub struct FrameBits<const N: usize> {
    bytes: [u8; N],
    cursor: usize,
}

/// Expands `frame` into its line levels, MSB of byte 0 first.
///
/// The returned iterator yields exactly `8 * N` levels.
pub fn encode<const N: usize>(frame: &Frame<N>) -> FrameBits<N> {
    FrameBits {
        bytes: *frame.as_bytes(),
        cursor: 0,
    }
}

impl<const N: usize> Iterator for FrameBits<N> {
    type Item = BitLevel;

    fn next(&mut self) -> Option<BitLevel> {
        let byte = *self.bytes.get(self.cursor / 8)?;
        let shift = 7 - (self.cursor % 8);
        self.cursor += 1;
        Some(BitLevel::from((byte >> shift) & 1 != 0))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = N * 8 - self.cursor;
        (remaining, Some(remaining))
    }
}

impl<const N: usize> ExactSizeIterator for FrameBits<N> {}

impl<const N: usize> FusedIterator for FrameBits<N> {}

#[cfg(test)]
mod tests {
    use super::*;
    use super::BitLevel::{High as H, Low as L};

    #[test]
    fn test_encode_msb_first() {
        let levels: Vec<_> = encode(&Frame::new([0xaa, 0x0f])).collect();
        assert_eq!(levels, vec![H, L, H, L, H, L, H, L, L, L, L, L, H, H, H, H]);
    }

    #[test]
    fn test_encode_length_and_size_hint() {
        let frame = Frame::new([0u8; 12]);
        let mut bits = encode(&frame);
        assert_eq!(bits.len(), 96);
        let _ = bits.next();
        assert_eq!(bits.len(), 95);
        assert_eq!(bits.count(), 95);
    }

    #[test]
    fn test_encode_is_pure() {
        let frame = Frame::new([0xaa, 0xaa, 0x55, 0xa1, 0x21, 0x21, 0x21, 0x18, 0x8d, 0xa1, 0x0a, 0x40]);
        let before = frame;
        let first: Vec<_> = encode(&frame).collect();
        let second: Vec<_> = encode(&frame).collect();
        assert_eq!(first, second);
        assert_eq!(frame, before);
    }

    #[test]
    fn test_encode_is_fused() {
        let mut bits = encode(&Frame::new([0xff]));
        assert_eq!(bits.by_ref().count(), 8);
        assert_eq!(bits.next(), None);
        assert_eq!(bits.next(), None);
    }

    #[test]
    fn test_bool_conversions() {
        assert_eq!(BitLevel::from(true), H);
        assert_eq!(BitLevel::from(false), L);
        assert!(bool::from(H));
        assert!(!L.is_high());
    }
}
