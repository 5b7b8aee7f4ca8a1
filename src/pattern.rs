//! Pattern frames and their rotation.
//!
//! A [`PatternLibrary`] is an ordered, fixed set of effect frames plus one
//! distinguished idle frame. The scheduler sends the idle frame on every
//! iteration and walks the pattern frames round-robin, one per rotation
//! interval.
//!
//! The only mutable state is the rotation index. It starts at 0 and wraps
//! after the last frame; the frames themselves never change.
//!
//! [`catalog`] holds every effect captured from the accessory's own remote.

#[cfg(not(feature = "std"))]
use heapless::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use crate::consts::{FRAME_LEN, MAX_PATTERNS};
use crate::error::Error;
use crate::frame::NamedFrame;

#[cfg(feature = "std")]
type PatternVec<const N: usize> = Vec<NamedFrame<N>>;
#[cfg(not(feature = "std"))]
type PatternVec<const N: usize> = Vec<NamedFrame<N>, MAX_PATTERNS>;

/// Ordered pattern frames, the idle frame, and the rotation index.
#[derive(Debug, Clone)]
pub struct PatternLibrary<const N: usize = FRAME_LEN> {
    idle: NamedFrame<N>,
    patterns: PatternVec<N>,
    index: usize,
}

impl<const N: usize> PatternLibrary<N> {
    /// Builds a library from an idle frame and the frames to rotate through.
    ///
    /// The rotation starts at `patterns[0]`.
    ///
    /// # Errors
    /// - [`Error::EmptyLibrary`] if `patterns` is empty
    /// - [`Error::LibraryFull`] if `patterns` exceeds
    ///   [`MAX_PATTERNS`](crate::consts::MAX_PATTERNS) (without `std` only)
    pub fn new(idle: NamedFrame<N>, patterns: &[NamedFrame<N>]) -> Result<Self, Error> {
        if patterns.is_empty() {
            return Err(Error::EmptyLibrary);
        }
        Ok(Self {
            idle,
            patterns: collect_patterns(patterns)?,
            index: 0,
        })
    }

    /// The idle frame. Never affected by rotation.
    pub fn idle(&self) -> &NamedFrame<N> {
        &self.idle
    }

    /// The frame at the rotation index.
    pub fn current(&self) -> &NamedFrame<N> {
        &self.patterns[self.index]
    }

    /// Moves the rotation index to the next frame, wrapping after the last.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.patterns.len();
    }

    /// Returns the frame at the rotation index, then advances the index.
    pub fn next(&mut self) -> NamedFrame<N> {
        let frame = *self.current();
        self.advance();
        frame
    }

    /// Current rotation index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of frames in the rotation.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Always `false`: a library cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The rotation frames in order.
    pub fn patterns(&self) -> &[NamedFrame<N>] {
        &self.patterns
    }
}

impl PatternLibrary<FRAME_LEN> {
    /// The shipped rotation: [`catalog::ROTATION`] with [`catalog::NOTHING`] as idle.
    pub fn default_rotation() -> Self {
        match Self::new(catalog::NOTHING, &catalog::ROTATION) {
            Ok(library) => library,
            Err(_) => unreachable!("shipped rotation size is checked at compile time"),
        }
    }
}

impl Default for PatternLibrary<FRAME_LEN> {
    fn default() -> Self {
        Self::default_rotation()
    }
}

#[cfg(feature = "std")]
fn collect_patterns<const N: usize>(patterns: &[NamedFrame<N>]) -> Result<PatternVec<N>, Error> {
    Ok(patterns.to_vec())
}

#[cfg(not(feature = "std"))]
fn collect_patterns<const N: usize>(patterns: &[NamedFrame<N>]) -> Result<PatternVec<N>, Error> {
    Vec::from_slice(patterns).map_err(|_| Error::LibraryFull(MAX_PATTERNS))
}

const _: () = assert!(!catalog::ROTATION.is_empty() && catalog::ROTATION.len() <= MAX_PATTERNS);

/// Effect frames captured from the accessory's remote.
///
/// Every frame starts with the `0xAA 0xAA` sync preamble. Captures that
/// came out one byte short are zero-filled to [`FRAME_LEN`].
pub mod catalog {
    use crate::consts::FRAME_LEN;
    use crate::frame::{Frame, NamedFrame};

    const fn pad(bytes: &[u8]) -> Frame<FRAME_LEN> {
        match Frame::padded(bytes) {
            Some(frame) => frame,
            None => panic!("capture longer than a frame"),
        }
    }

    /// Idle frame. Keeps receivers awake without changing their state.
    pub const NOTHING: NamedFrame = NamedFrame::new(
        "nothing",
        Frame::new([0xaa, 0xaa, 0x55, 0xa1, 0x21, 0x21, 0x21, 0x18, 0x8d, 0xa1, 0x0a, 0x40]),
    );
    /// Gold, fading in.
    pub const GOLD_FADE_IN: NamedFrame = NamedFrame::new(
        "gold_fade_in",
        Frame::new([0xaa, 0xaa, 0x65, 0x21, 0x24, 0x6d, 0x61, 0x23, 0x11, 0x61, 0x2b, 0x40]),
    );
    /// Gold, fast fade.
    pub const GOLD_FAST_FADE: NamedFrame = NamedFrame::new(
        "gold_fast_fade",
        Frame::new([0xaa, 0xaa, 0x5b, 0x61, 0x24, 0x6d, 0x61, 0x12, 0x51, 0x61, 0x22, 0x80]),
    );
    /// White, fast fade.
    pub const WHITE_FASTFADE: NamedFrame = NamedFrame::new(
        "white_fastfade",
        pad(&[0xaa, 0xaa, 0x56, 0xa1, 0x2d, 0x6d, 0x6d, 0x52, 0x51, 0x61, 0x0b]),
    );
    /// Wine red, fading in.
    pub const WINE_FADE_IN: NamedFrame = NamedFrame::new(
        "wine_fade_in",
        Frame::new([0xaa, 0xaa, 0x69, 0xa1, 0x21, 0x2d, 0x61, 0x23, 0x11, 0x61, 0x28, 0x40]),
    );
    /// Random blue, fade.
    pub const RAND_BLUE_FADE: NamedFrame = NamedFrame::new(
        "rand_blue_fade",
        Frame::new([0xaa, 0xaa, 0x61, 0x21, 0x0c, 0xa1, 0x2d, 0x62, 0x62, 0x61, 0x0d, 0x80]),
    );
    /// Random gold, blink.
    pub const RAND_GOLD_BLINK: NamedFrame = NamedFrame::new(
        "rand_gold_blink",
        Frame::new([0xaa, 0xaa, 0x50, 0xa1, 0x24, 0x6d, 0x61, 0x19, 0x1a, 0xa1, 0x12, 0x40]),
    );
    /// Random gold, fade.
    pub const RAND_GOLD_FADE: NamedFrame = NamedFrame::new(
        "rand_gold_fade",
        pad(&[0xaa, 0xaa, 0x52, 0xa1, 0x24, 0x6d, 0x61, 0x22, 0x6a, 0x61, 0x0d]),
    );
    /// Random gold, fast fade.
    pub const RAND_GOLD_FASTFADE: NamedFrame = NamedFrame::new(
        "rand_gold_fastfade",
        Frame::new([0xaa, 0xaa, 0x55, 0xa1, 0x24, 0x6d, 0x61, 0x0a, 0x59, 0x61, 0x18, 0x40]),
    );
    /// Random red, fade.
    pub const RAND_RED_FADE: NamedFrame = NamedFrame::new(
        "rand_red_fade",
        Frame::new([0xaa, 0xaa, 0x69, 0x21, 0x21, 0x2d, 0x61, 0x22, 0x62, 0x61, 0x19, 0x40]),
    );
    /// Random red, fast blink.
    pub const RAND_RED_FASTBLINK: NamedFrame = NamedFrame::new(
        "rand_red_fastblink",
        Frame::new([0xaa, 0xaa, 0x5b, 0x61, 0x21, 0x2d, 0x61, 0x19, 0x1a, 0xa1, 0x0a, 0x40]),
    );
    /// Random red, fast fade.
    pub const RAND_RED_FASTFADE: NamedFrame = NamedFrame::new(
        "rand_red_fastfade",
        Frame::new([0xaa, 0xaa, 0x53, 0x21, 0x21, 0x2d, 0x61, 0x0a, 0x59, 0x61, 0x11, 0x40]),
    );
    /// Random turquoise, blink.
    pub const RAND_TURQ_BLINK: NamedFrame = NamedFrame::new(
        "rand_turq_blink",
        Frame::new([0xaa, 0xaa, 0x4d, 0xa1, 0x2d, 0x61, 0x2c, 0x6d, 0x93, 0x61, 0x24, 0x40]),
    );
    /// Random white, blink.
    pub const RAND_WHITE_BLINK: NamedFrame = NamedFrame::new(
        "rand_white_blink",
        Frame::new([0xaa, 0xaa, 0x52, 0xa1, 0x2d, 0x6d, 0x6d, 0x59, 0x1a, 0xa1, 0x22, 0x40]),
    );
    /// Random white, fade.
    pub const RAND_WHITE_FADE: NamedFrame = NamedFrame::new(
        "rand_white_fade",
        Frame::new([0xaa, 0xaa, 0x59, 0x61, 0x2d, 0x6d, 0x6d, 0x62, 0x62, 0x61, 0x2b, 0x40]),
    );
    /// Random white, fast fade.
    pub const RAND_WHITE_FASTFADE: NamedFrame = NamedFrame::new(
        "rand_white_fastfade",
        Frame::new([0xaa, 0xaa, 0x66, 0xa1, 0x2d, 0x6d, 0x6d, 0x4a, 0x59, 0x61, 0x2a, 0x40]),
    );

    /// The rotation shipped by default.
    pub const ROTATION: [NamedFrame; 4] =
        [GOLD_FADE_IN, GOLD_FAST_FADE, WHITE_FASTFADE, WINE_FADE_IN];

    /// Every captured frame, idle first.
    pub static CATALOG: [NamedFrame; 16] = [
        NOTHING,
        GOLD_FADE_IN,
        GOLD_FAST_FADE,
        WHITE_FASTFADE,
        WINE_FADE_IN,
        RAND_BLUE_FADE,
        RAND_GOLD_BLINK,
        RAND_GOLD_FADE,
        RAND_GOLD_FASTFADE,
        RAND_RED_FADE,
        RAND_RED_FASTBLINK,
        RAND_RED_FASTFADE,
        RAND_TURQ_BLINK,
        RAND_WHITE_BLINK,
        RAND_WHITE_FADE,
        RAND_WHITE_FASTFADE,
    ];

    /// Looks a captured frame up by effect name.
    pub fn find(name: &str) -> Option<&'static NamedFrame> {
        CATALOG.iter().find(|pattern| pattern.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;

    fn named(name: &'static str, byte: u8) -> NamedFrame<2> {
        NamedFrame::new(name, Frame::new([0xaa, byte]))
    }

    #[test]
    fn test_next_is_round_robin() {
        let frames = [named("a", 1), named("b", 2), named("c", 3)];
        let mut library = PatternLibrary::new(named("idle", 0), &frames).unwrap();

        let first_cycle: Vec<_> = (0..3).map(|_| library.next().name).collect();
        assert_eq!(first_cycle, vec!["a", "b", "c"]);
        assert_eq!(library.next().name, "a");
        assert_eq!(library.index(), 1);
    }

    #[test]
    fn test_current_does_not_advance() {
        let frames = [named("a", 1), named("b", 2)];
        let mut library = PatternLibrary::new(named("idle", 0), &frames).unwrap();

        assert_eq!(library.current().name, "a");
        assert_eq!(library.current().name, "a");
        library.advance();
        assert_eq!(library.current().name, "b");
        library.advance();
        assert_eq!(library.index(), 0);
    }

    #[test]
    fn test_idle_unaffected_by_rotation() {
        let frames = [named("a", 1), named("b", 2)];
        let mut library = PatternLibrary::new(named("idle", 0), &frames).unwrap();
        let idle = *library.idle();
        for _ in 0..5 {
            let _ = library.next();
            assert_eq!(*library.idle(), idle);
        }
    }

    #[test]
    fn test_single_frame_library_wraps_to_itself() {
        let frames = [named("only", 7)];
        let mut library = PatternLibrary::new(named("idle", 0), &frames).unwrap();
        assert_eq!(library.next().name, "only");
        assert_eq!(library.next().name, "only");
        assert_eq!(library.len(), 1);
        assert!(!library.is_empty());
    }

    #[test]
    fn test_empty_library_is_rejected() {
        let frames: [NamedFrame<2>; 0] = [];
        assert_eq!(
            PatternLibrary::new(named("idle", 0), &frames).unwrap_err(),
            Error::EmptyLibrary
        );
    }

    #[test]
    fn test_default_rotation() {
        let mut library = PatternLibrary::default_rotation();
        assert_eq!(library.idle().name, "nothing");
        assert_eq!(library.len(), 4);
        let names: Vec<_> = (0..4).map(|_| library.next().name).collect();
        assert_eq!(
            names,
            vec!["gold_fade_in", "gold_fast_fade", "white_fastfade", "wine_fade_in"]
        );
        assert_eq!(library.patterns(), &catalog::ROTATION[..]);
    }

    #[test]
    fn test_short_captures_are_zero_filled() {
        assert_eq!(catalog::WHITE_FASTFADE.frame.as_bytes()[10], 0x0b);
        assert_eq!(catalog::WHITE_FASTFADE.frame.as_bytes()[11], 0x00);
        assert_eq!(catalog::RAND_GOLD_FADE.frame.as_bytes()[11], 0x00);
    }

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(catalog::find("nothing"), Some(&catalog::NOTHING));
        assert_eq!(
            catalog::find("rand_turq_blink").map(|p| p.frame.as_bytes()[2]),
            Some(0x4d)
        );
        assert!(catalog::find("disco").is_none());
    }

    #[test]
    fn test_catalog_frames_share_preamble_and_names_are_unique() {
        for (i, pattern) in catalog::CATALOG.iter().enumerate() {
            assert_eq!(&pattern.frame.as_bytes()[..2], &[0xaa, 0xaa], "{}", pattern.name);
            assert!(
                catalog::CATALOG[i + 1..].iter().all(|other| other.name != pattern.name),
                "duplicate {}",
                pattern.name
            );
        }
    }
}
