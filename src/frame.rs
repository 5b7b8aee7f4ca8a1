//! Fixed-length command frames.

use core::fmt;

use crate::consts::FRAME_LEN;

/// A complete command for the receiving accessory.
///
/// The length is part of the type, so every frame in a
/// [`PatternLibrary`](crate::pattern::PatternLibrary) has the same byte count.
/// Frames are `Copy` and never change once built; the encoder works on its
/// own copy of the bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame<const N: usize = FRAME_LEN> {
    bytes: [u8; N],
}

impl<const N: usize> Frame<N> {
    /// Builds a frame from its bytes.
    pub const fn new(bytes: [u8; N]) -> Self {
        Self { bytes }
    }

    /// Builds a frame from a shorter capture, zero-filling the tail.
    ///
    /// Some captures end one byte early because their last byte is all
    /// zeros. Returns `None` if `bytes` is longer than `N`.
    pub const fn padded(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > N {
            return None;
        }
        let mut out = [0u8; N];
        let mut i = 0;
        while i < bytes.len() {
            out[i] = bytes[i];
            i += 1;
        }
        Some(Self { bytes: out })
    }

    /// The frame bytes, in transmission order.
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Number of bytes in the frame.
    pub const fn len(&self) -> usize {
        N
    }

    /// Whether the frame has no bytes at all.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Number of bits on the wire, excluding the trailing gap.
    pub const fn bit_len(&self) -> usize {
        N * 8
    }
}

impl<const N: usize> Default for Frame<N> {
    fn default() -> Self {
        Self { bytes: [0; N] }
    }
}

impl<const N: usize> From<[u8; N]> for Frame<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self::new(bytes)
    }
}

impl<const N: usize> AsRef<[u8]> for Frame<N> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const N: usize> fmt::Debug for Frame<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Frame[")?;
        for (i, b) in self.bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        f.write_str("]")
    }
}

#[cfg(feature = "defmt-0-3")]
impl<const N: usize> defmt::Format for Frame<N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Frame{=[u8]:x}", &self.bytes[..])
    }
}

/// A frame with the name of the effect it triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedFrame<const N: usize = FRAME_LEN> {
    /// Effect name, e.g. `gold_fade_in`.
    pub name: &'static str,
    /// The frame bytes.
    pub frame: Frame<N>,
}

impl<const N: usize> NamedFrame<N> {
    /// Pairs a name with a frame.
    pub const fn new(name: &'static str, frame: Frame<N>) -> Self {
        Self { name, frame }
    }
}
