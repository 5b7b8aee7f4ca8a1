//! The transmission control loop.
//!
//! [`TransmissionScheduler`] owns the transmitter and the pattern library.
//! Every iteration it sends the idle frame, sends the next pattern frame if
//! the rotation interval has passed, then pauses briefly:
//!
//! ```text
//!            ┌──────────────── every iteration ────────────────┐
//!  IdleTick ─┤ idle frame ─▶ (interval due?) ─▶ pattern frame ─┤─▶ yield
//!            └──────────────── PatternTick while sending ──────┘
//! ```
//!
//! The pattern cadence is anchored: each pattern tick moves the recorded
//! timestamp forward by exactly one interval, so time spent sending frames
//! does not push later patterns back. If the loop falls more than a full
//! interval behind, the anchor snaps to the current time instead of firing
//! a burst of catch-up patterns.
//!
//! A [`Error::HardwareFault`] ends the loop. No further frame is attempted.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::Config;
use crate::consts::FRAME_LEN;
use crate::driver::FrameTransmitter;
use crate::error::Error;
use crate::pattern::PatternLibrary;
use crate::stop::StopToken;
use crate::timer::MonotonicClock;

/// Where the scheduler is within an iteration.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum SchedulerState {
    /// Steady state: only the idle frame is sent.
    #[default]
    IdleTick,
    /// A pattern frame is due or being sent.
    PatternTick,
}

/// Sends the idle frame continuously and rotates pattern frames on a fixed
/// interval.
#[derive(Debug)]
pub struct TransmissionScheduler<P, C, D, const N: usize = FRAME_LEN>
where
    P: OutputPin,
    C: MonotonicClock,
    D: DelayNs,
{
    transmitter: FrameTransmitter<P, C, D>,
    library: PatternLibrary<N>,
    rotation_interval_ms: u64,
    loop_yield_ms: u32,
    last_pattern_ms: u64,
    state: SchedulerState,
    iterations: u32,
    patterns_sent: u32,
}

impl<P, C, D, const N: usize> TransmissionScheduler<P, C, D, N>
where
    P: OutputPin,
    C: MonotonicClock,
    D: DelayNs,
{
    /// Takes ownership of the transmitter and the library.
    ///
    /// The rotation interval is counted from this call, so the first
    /// pattern goes out one interval after construction.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] if `config` does not validate.
    pub fn new(
        mut transmitter: FrameTransmitter<P, C, D>,
        library: PatternLibrary<N>,
        config: &Config,
    ) -> Result<Self, Error> {
        config.validate()?;
        let now = transmitter.timer().now_ms();
        Ok(Self {
            transmitter,
            library,
            rotation_interval_ms: u64::from(config.rotation_interval_ms),
            loop_yield_ms: config.loop_yield_ms,
            last_pattern_ms: now,
            state: SchedulerState::IdleTick,
            iterations: 0,
            patterns_sent: 0,
        })
    }

    /// Runs one iteration of the loop.
    ///
    /// Returns [`SchedulerState::PatternTick`] if a pattern frame went out
    /// in this iteration, [`SchedulerState::IdleTick`] otherwise.
    ///
    /// # Errors
    /// [`Error::HardwareFault`] from the transmitter. The rotation index
    /// only moves once a pattern frame has been sent in full.
    pub fn step(&mut self) -> Result<SchedulerState, Error> {
        let idle = self.library.idle().frame;
        self.transmitter.transmit(&idle)?;

        let now = self.transmitter.timer().now_ms();
        let outcome = if now.wrapping_sub(self.last_pattern_ms) > self.rotation_interval_ms {
            self.state = SchedulerState::PatternTick;
            // Advance by one interval, not to `now`, so frame airtime does not accumulate.
            self.last_pattern_ms = self.last_pattern_ms.wrapping_add(self.rotation_interval_ms);
            if now.wrapping_sub(self.last_pattern_ms) > self.rotation_interval_ms {
                warn!("scheduler: pattern cadence fell behind, resyncing");
                self.last_pattern_ms = now;
            }

            let pattern = *self.library.current();
            debug!("scheduler: pattern {}", pattern.name);
            if let Err(e) = self.transmitter.transmit(&pattern.frame) {
                self.state = SchedulerState::IdleTick;
                return Err(e);
            }
            self.library.advance();
            self.patterns_sent = self.patterns_sent.wrapping_add(1);
            self.state = SchedulerState::IdleTick;
            SchedulerState::PatternTick
        } else {
            SchedulerState::IdleTick
        };

        self.transmitter.timer().delay_ms(self.loop_yield_ms);
        self.iterations = self.iterations.wrapping_add(1);
        Ok(outcome)
    }

    /// Loops [`step`](Self::step) until `stop` is raised or a frame fails.
    ///
    /// The token is checked before every iteration, never in the middle of
    /// a frame.
    ///
    /// # Errors
    /// The first error from [`step`](Self::step). The loop does not continue
    /// past it.
    pub fn run(&mut self, stop: &StopToken) -> Result<(), Error> {
        info!(
            "scheduler: started with {} patterns every {} ms",
            self.library.len(),
            self.rotation_interval_ms
        );
        while !stop.is_stopped() {
            if let Err(e) = self.step() {
                error!(
                    "scheduler: halted after {} iterations: {:?}",
                    self.iterations,
                    e
                );
                return Err(e);
            }
        }
        info!(
            "scheduler: stopped after {} iterations, {} patterns",
            self.iterations,
            self.patterns_sent
        );
        Ok(())
    }

    /// State of the current iteration.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Completed iterations.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Pattern frames sent.
    pub fn patterns_sent(&self) -> u32 {
        self.patterns_sent
    }

    /// The pattern library and its rotation index.
    pub fn library(&self) -> &PatternLibrary<N> {
        &self.library
    }

    /// The transmitter, for its statistics.
    pub fn transmitter(&self) -> &FrameTransmitter<P, C, D> {
        &self.transmitter
    }

    /// Gives back the transmitter and the library.
    pub fn release(self) -> (FrameTransmitter<P, C, D>, PatternLibrary<N>) {
        (self.transmitter, self.library)
    }
}
