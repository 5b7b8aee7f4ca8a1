//! Cancellation for the scheduler run loop.
//!
//! The run loop never returns on its own. A [`StopToken`] lets an interrupt
//! handler, a signal handler or another thread ask it to finish after the
//! current iteration. The flag lives in a `critical_section::Mutex`, so it can
//! be a `static` shared with an ISR on bare metal and is thread-safe under
//! `std` (with the `critical-section/std` implementation).
//!
//! ```rust
//! use ook868::stop::StopToken;
//!
//! static STOP: StopToken = StopToken::new();
//!
//! // e.g. from a button interrupt
//! STOP.stop();
//! assert!(STOP.is_stopped());
//! ```

use core::cell::Cell;
use core::fmt;

use critical_section::Mutex;

/// One-way stop flag.
pub struct StopToken {
    stopped: Mutex<Cell<bool>>,
}

impl StopToken {
    /// Creates a token that has not been raised.
    pub const fn new() -> Self {
        Self {
            stopped: Mutex::new(Cell::new(false)),
        }
    }

    /// Asks the loop holding this token to stop.
    pub fn stop(&self) {
        critical_section::with(|cs| self.stopped.borrow(cs).set(true));
    }

    /// Whether [`stop`](StopToken::stop) has been called.
    pub fn is_stopped(&self) -> bool {
        critical_section::with(|cs| self.stopped.borrow(cs).get())
    }

    /// Lowers the flag so the token can be reused for another run.
    pub fn reset(&self) {
        critical_section::with(|cs| self.stopped.borrow(cs).set(false));
    }
}

impl fmt::Debug for StopToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopToken")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

impl Default for StopToken {
    fn default() -> Self {
        Self::new()
    }
}
