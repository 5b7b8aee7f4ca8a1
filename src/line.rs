//! Exclusive owner of the keyed output line.
//!
//! The radio's direct-mode data input (DIO2 on SX126x parts) is wired to a
//! GPIO. [`LineDriver`] takes that pin by value, so only one writer can ever
//! exist, and every write completes before `set_level` returns.

use embedded_hal::digital::{Error as _, OutputPin};

use crate::encoding::BitLevel;
use crate::error::Error;

/// Drives the OOK data line.
#[derive(Debug)]
pub struct LineDriver<P>
where
    P: OutputPin,
{
    pin: P,
}

impl<P> LineDriver<P>
where
    P: OutputPin,
{
    /// Takes ownership of `pin` and drives it low (carrier off).
    ///
    /// # Errors
    /// [`Error::HardwareFault`] if the pin cannot be driven.
    pub fn new(pin: P) -> Result<Self, Error> {
        let mut driver = Self { pin };
        driver.set_level(BitLevel::Low)?;
        Ok(driver)
    }

    /// Sets the line to `level`.
    ///
    /// # Errors
    /// [`Error::HardwareFault`] if the pin cannot be driven. This is fatal;
    /// callers must not retry.
    pub fn set_level(&mut self, level: BitLevel) -> Result<(), Error> {
        let result = match level {
            BitLevel::High => self.pin.set_high(),
            BitLevel::Low => self.pin.set_low(),
        };
        result.map_err(|e| {
            error!("output pin fault: {:?}", e.kind());
            Error::HardwareFault
        })
    }

    /// Gives back the pin.
    pub fn release(self) -> P {
        self.pin
    }
}
