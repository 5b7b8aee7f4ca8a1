//! Simulated hardware shared by the unit tests.
//!
//! `SimClock` and `SimDelay` share one nanosecond counter: time only moves
//! when something delays, so busy-waits are exact and deterministic.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use crate::timer::MonotonicClock;

#[derive(Clone, Debug, Default)]
pub(crate) struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub(crate) fn advance_us(&self, us: u64) {
        self.0.set(self.0.get() + us * 1_000);
    }
}

impl MonotonicClock for SimClock {
    fn now_us(&self) -> u64 {
        self.0.get() / 1_000
    }
}

#[derive(Clone, Debug)]
pub(crate) struct SimDelay(Rc<Cell<u64>>);

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.set(self.0.get() + u64::from(ns));
    }
}

/// A clock and a delay provider driven by the same simulated time.
pub(crate) fn sim() -> (SimClock, SimDelay) {
    let clock = SimClock::default();
    let delay = SimDelay(clock.0.clone());
    (clock, delay)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PinEvent {
    pub(crate) at_us: u64,
    pub(crate) high: bool,
    pub(crate) ok: bool,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin that timestamps every write and can start failing after a
/// given number of writes.
#[derive(Clone, Debug)]
pub(crate) struct RecordingPin {
    clock: SimClock,
    events: Rc<RefCell<Vec<PinEvent>>>,
    fail_from: Option<usize>,
}

impl RecordingPin {
    pub(crate) fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            events: Rc::new(RefCell::new(Vec::new())),
            fail_from: None,
        }
    }

    /// Writes number `n` (1-based) and every later write fail.
    pub(crate) fn failing_from(clock: &SimClock, n: usize) -> Self {
        Self {
            fail_from: Some(n),
            ..Self::new(clock)
        }
    }

    pub(crate) fn events(&self) -> Vec<PinEvent> {
        self.events.borrow().clone()
    }

    fn write(&mut self, high: bool) -> Result<(), PinFault> {
        let mut events = self.events.borrow_mut();
        let ok = self.fail_from.is_none_or(|n| events.len() + 1 < n);
        events.push(PinEvent {
            at_us: self.clock.now_us(),
            high,
            ok,
        });
        if ok { Ok(()) } else { Err(PinFault) }
    }
}

impl ErrorType for RecordingPin {
    type Error = PinFault;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), PinFault> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        self.write(true)
    }
}
