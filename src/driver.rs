//! Bit-banged OOK frame transmitter.
//!
//! This module provides the [`FrameTransmitter`] struct, which keys a
//! fixed-length [`Frame`] onto a direct-mode radio's data line one bit at a
//! time, holding every bit for exactly one bit duration.
//!
//! The transmitter blocks for the whole frame. Timing comes from a
//! busy-waiting [`BitTimer`], so the calling thread is fully occupied while
//! a frame is on the air; nothing else may write to the line in that time.
//!
//! ## Wire Format
//!
//! - `HIGH` = carrier on = logical `1`
//! - `LOW`  = carrier off = logical `0`
//! - Bits are sent MSB first, byte 0 first (see [`crate::encoding`])
//! - After the last bit the line is forced `LOW` and held for
//!   [`TRAILING_GAP_BITS`](crate::consts::TRAILING_GAP_BITS) bit slots
//!
//! A 12-byte frame at 500 µs per bit therefore occupies
//! `(96 + 8) × 500 µs = 52 ms`.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use ook868::config::Config;
//! use ook868::driver::FrameTransmitter;
//! use ook868::frame::Frame;
//! use ook868::timer::{BitTimer, StdClock};
//!
//! # let mut expected = vec![PinTransaction::set(PinState::Low)];
//! # for bit in [1, 0, 0, 0, 0, 0, 0, 1] {
//! #     expected.push(PinTransaction::set(if bit == 1 { PinState::High } else { PinState::Low }));
//! # }
//! # expected.push(PinTransaction::set(PinState::Low));
//! # let pin = Pin::new(&expected);
//! let config = Config { bit_duration_us: 50, ..Config::default() };
//! let timer = BitTimer::new(StdClock::new(), NoopDelay::new());
//! let mut tx = FrameTransmitter::new(pin, timer, &config).unwrap();
//!
//! tx.transmit(&Frame::new([0x81])).unwrap();
//! assert_eq!(tx.frames_sent(), 1);
//! # let (line, _) = tx.release();
//! # line.release().done();
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::Config;
use crate::encoding::{BitLevel, encode};
use crate::error::Error;
use crate::frame::Frame;
use crate::line::LineDriver;
use crate::timer::{BitTimer, MonotonicClock};

/// Operational state of a [`FrameTransmitter`].
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum TxMode {
    ///   Line is low and no frame is on the air.
    #[default]
    Idle,
    ///   A frame is being keyed onto the line.
    Tx,
    ///   The line could not be driven. The transmitter refuses all further
    ///   frames; the owner must stop.
    Faulted,
}

/// Keys whole frames onto the OOK data line.
///
/// ## Type Parameters
///
/// - `P`: the data line, an [`embedded_hal::digital::OutputPin`]
/// - `C`: the [`MonotonicClock`] used to measure bit periods
/// - `D`: the [`embedded_hal::delay::DelayNs`] used to yield while waiting
#[derive(Debug)]
pub struct FrameTransmitter<P, C, D>
where
    P: OutputPin,
    C: MonotonicClock,
    D: DelayNs,
{
    line: LineDriver<P>,
    timer: BitTimer<C, D>,
    bit_duration_us: u32,
    trailing_gap_bits: u8,
    mode: TxMode,
    frames_sent: u32,
}

impl<P, C, D> FrameTransmitter<P, C, D>
where
    P: OutputPin,
    C: MonotonicClock,
    D: DelayNs,
{
    /// Creates a transmitter that owns `pin` and `timer`.
    ///
    /// The line is driven low (carrier off) before this returns.
    ///
    /// # Errors
    /// - [`Error::InvalidConfig`] if `config` does not validate
    /// - [`Error::HardwareFault`] if the pin cannot be driven
    pub fn new(pin: P, timer: BitTimer<C, D>, config: &Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            line: LineDriver::new(pin)?,
            timer,
            bit_duration_us: config.bit_duration_us,
            trailing_gap_bits: config.trailing_gap_bits,
            mode: TxMode::Idle,
            frames_sent: 0,
        })
    }

    /// Transmits `frame` to completion.
    ///
    /// For every bit the line level is set first, then the timer waits one
    /// bit duration measured from that bit's start. After the last bit the
    /// line is forced low and held for the trailing gap.
    ///
    /// # Errors
    /// [`Error::HardwareFault`] if the line cannot be driven. The frame is
    /// abandoned at the failing bit, one attempt is made to leave the line
    /// low, and the transmitter latches into [`TxMode::Faulted`]. Every later
    /// call fails the same way without touching the line.
    pub fn transmit<const N: usize>(&mut self, frame: &Frame<N>) -> Result<(), Error> {
        if self.mode == TxMode::Faulted {
            return Err(Error::HardwareFault);
        }
        self.mode = TxMode::Tx;
        trace!("tx frame: {} bytes", N);

        for level in encode(frame) {
            let start = self.timer.now_us();
            if let Err(e) = self.line.set_level(level) {
                return Err(self.fault(e));
            }
            self.timer.wait_from(start, self.bit_duration_us);
        }

        if let Err(e) = self.line.set_level(BitLevel::Low) {
            return Err(self.fault(e));
        }
        for _ in 0..self.trailing_gap_bits {
            self.timer.wait_us(self.bit_duration_us);
        }

        self.frames_sent = self.frames_sent.wrapping_add(1);
        self.mode = TxMode::Idle;
        Ok(())
    }

    fn fault(&mut self, err: Error) -> Error {
        // Best effort only: the pin already failed once.
        let _ = self.line.set_level(BitLevel::Low);
        self.mode = TxMode::Faulted;
        error!("transmission aborted after {} frames", self.frames_sent);
        err
    }

    /// Current operational state.
    pub fn mode(&self) -> TxMode {
        self.mode
    }

    /// Number of frames sent to completion.
    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    /// Time each bit is held, in microseconds.
    pub fn bit_duration_us(&self) -> u32 {
        self.bit_duration_us
    }

    /// The timer, for the coarse pauses between frames.
    pub fn timer(&mut self) -> &mut BitTimer<C, D> {
        &mut self.timer
    }

    /// Gives back the line driver and the timer.
    pub fn release(self) -> (LineDriver<P>, BitTimer<C, D>) {
        (self.line, self.timer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TRAILING_GAP_BITS;
    use crate::testing::{RecordingPin, SimClock, SimDelay, sim};
    use crate::timer::frame_duration_us;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    const NOTHING: [u8; 12] = [
        0xaa, 0xaa, 0x55, 0xa1, 0x21, 0x21, 0x21, 0x18, 0x8d, 0xa1, 0x0a, 0x40,
    ];

    fn sim_transmitter(
        pin: RecordingPin,
        clock: SimClock,
        delay: SimDelay,
    ) -> FrameTransmitter<RecordingPin, SimClock, SimDelay> {
        FrameTransmitter::new(pin, BitTimer::new(clock, delay), &Config::default()).unwrap()
    }

    fn expected_states(bytes: &[u8]) -> Vec<PinTransaction> {
        let mut states = vec![PinTransaction::set(PinState::Low)];
        for byte in bytes {
            for shift in (0..8).rev() {
                states.push(PinTransaction::set(if (byte >> shift) & 1 == 1 {
                    PinState::High
                } else {
                    PinState::Low
                }));
            }
        }
        states.push(PinTransaction::set(PinState::Low));
        states
    }

    #[test]
    fn test_transmitter_initialization() {
        let pin = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let timer = BitTimer::new(SimClock::default(), NoopDelay::new());
        let tx = FrameTransmitter::new(pin, timer, &Config::default()).unwrap();
        assert_eq!(tx.mode(), TxMode::Idle);
        assert_eq!(tx.frames_sent(), 0);
        let (line, _) = tx.release();
        line.release().done();
    }

    #[test]
    fn test_rejects_zero_bit_duration() {
        let (clock, delay) = sim();
        let pin = RecordingPin::new(&clock);
        let config = Config {
            bit_duration_us: 0,
            ..Config::default()
        };
        let err = FrameTransmitter::new(pin.clone(), BitTimer::new(clock, delay), &config)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(pin.events().is_empty());
    }

    #[test]
    fn test_transmit_writes_every_bit_msb_first() {
        let (clock, delay) = sim();
        let pin = PinMock::new(&expected_states(&NOTHING));
        let mut tx =
            FrameTransmitter::new(pin, BitTimer::new(clock, delay), &Config::default()).unwrap();

        tx.transmit(&Frame::new(NOTHING)).unwrap();

        assert_eq!(tx.frames_sent(), 1);
        assert_eq!(tx.mode(), TxMode::Idle);
        let (line, _) = tx.release();
        line.release().done();
    }

    #[test]
    fn test_end_to_end_levels_and_duration() {
        let (clock, delay) = sim();
        let pin = RecordingPin::new(&clock);
        let mut tx = sim_transmitter(pin.clone(), clock.clone(), delay);
        let start = clock.now_us();

        tx.transmit(&Frame::new(NOTHING)).unwrap();

        // First event is the idle-low from construction, last is the forced low.
        let events = pin.events();
        assert_eq!(events.len(), 1 + 96 + 1);
        let bits: Vec<bool> = events[1..97].iter().map(|e| e.high).collect();
        assert_eq!(
            &bits[..8],
            &[true, false, true, false, true, false, true, false]
        );
        assert!(events.iter().all(|e| e.ok));
        assert!(!events[97].high);
        assert_eq!(clock.now_us() - start, 104 * 500);
        assert_eq!(
            clock.now_us() - start,
            frame_duration_us(12, 500, TRAILING_GAP_BITS)
        );
    }

    #[test]
    fn test_bits_start_on_exact_boundaries() {
        let (clock, delay) = sim();
        let pin = RecordingPin::new(&clock);
        let mut tx = sim_transmitter(pin.clone(), clock.clone(), delay);

        tx.transmit(&Frame::new(NOTHING)).unwrap();
        tx.transmit(&Frame::new(NOTHING)).unwrap();

        let events = pin.events();
        // Skip the construction write, then check the second frame too.
        for (i, e) in events[1..97].iter().enumerate() {
            assert_eq!(e.at_us, i as u64 * 500);
        }
        assert_eq!(events[97].at_us, 96 * 500);
        assert_eq!(events[98].at_us, 104 * 500);
        assert_eq!(clock.now_us(), 2 * 104 * 500);
        assert_eq!(tx.frames_sent(), 2);
    }

    #[test]
    fn test_eleven_byte_frame() {
        let (clock, delay) = sim();
        let pin = RecordingPin::new(&clock);
        let mut tx = sim_transmitter(pin.clone(), clock.clone(), delay);

        tx.transmit(&Frame::new([0xaa; 11])).unwrap();

        assert_eq!(pin.events().len(), 1 + 88 + 1);
        assert_eq!(clock.now_us(), (88 + 8) * 500);
    }

    #[test]
    fn test_fault_aborts_immediately() {
        let (clock, delay) = sim();
        // Write 1 is construction, so write 51 is the 50th bit.
        let pin = RecordingPin::failing_from(&clock, 51);
        let mut tx = sim_transmitter(pin.clone(), clock.clone(), delay);

        assert_eq!(tx.transmit(&Frame::new(NOTHING)), Err(Error::HardwareFault));

        let events = pin.events();
        // 49 good bits, the failing 50th, then one attempt to park the line low.
        assert_eq!(events.len(), 1 + 50 + 1);
        assert!(events[..50].iter().all(|e| e.ok));
        assert!(!events[50].ok);
        assert!(!events[51].high);
        assert_eq!(tx.mode(), TxMode::Faulted);
        assert_eq!(tx.frames_sent(), 0);
        assert_eq!(clock.now_us(), 49 * 500);
    }

    #[test]
    fn test_faulted_transmitter_refuses_frames() {
        let (clock, delay) = sim();
        let pin = RecordingPin::failing_from(&clock, 2);
        let mut tx = sim_transmitter(pin.clone(), clock.clone(), delay);

        assert_eq!(tx.transmit(&Frame::new(NOTHING)), Err(Error::HardwareFault));
        let writes = pin.events().len();
        assert_eq!(tx.transmit(&Frame::new(NOTHING)), Err(Error::HardwareFault));
        assert_eq!(pin.events().len(), writes);
    }

    #[test]
    fn test_custom_gap() {
        let (clock, delay) = sim();
        let pin = RecordingPin::new(&clock);
        let config = Config {
            bit_duration_us: 250,
            trailing_gap_bits: 0,
            ..Config::default()
        };
        let mut tx =
            FrameTransmitter::new(pin, BitTimer::new(clock.clone(), delay), &config).unwrap();
        tx.transmit(&Frame::new([0x0f])).unwrap();
        assert_eq!(clock.now_us(), 8 * 250);
        assert_eq!(tx.bit_duration_us(), 250);
    }
}
