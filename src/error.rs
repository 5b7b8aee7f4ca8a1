//! Error types.
//!
//! Every failure either aborts start-up or aborts the run loop; nothing is
//! retried.

use thiserror::Error as ThisError;

/// Failure reported by the radio-control collaborator.
///
/// Carries the numeric status code returned by the radio driver so it can
/// be shown to the operator unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[error("radio driver failed with code {code}")]
pub struct RadioError {
    /// Status code returned by the radio driver.
    pub code: i32,
}

impl RadioError {
    /// Wraps a driver status code.
    pub const fn new(code: i32) -> Self {
        Self { code }
    }
}

/// Crate-wide error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Error {
    /// The output pin could not be driven. Fatal: the scheduler halts.
    #[error("output pin could not be driven")]
    HardwareFault,

    /// The radio could not be configured or switched to direct mode.
    #[error(transparent)]
    Radio(#[from] RadioError),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// A pattern library was built without any rotation frames.
    #[error("pattern library needs at least one frame")]
    EmptyLibrary,

    /// A pattern library was given more frames than it can hold.
    #[error("pattern library holds at most {0} frames")]
    LibraryFull(usize),

    /// A capture sample was not a signed integer duration.
    #[error("capture contains a malformed sample")]
    MalformedCapture,

    /// A capture expands to more bits than the frame can hold.
    #[error("capture expands to {bits} bits but the frame holds {capacity}")]
    CaptureTooLong {
        /// Bits produced by the capture.
        bits: usize,
        /// Bits available in the frame.
        capacity: usize,
    },
}

impl Error {
    /// Process exit status an application should report for this error.
    ///
    /// Radio failures exit with 1, pin faults with 2, and bad configuration
    /// or data with 3.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Radio(_) => 1,
            Error::HardwareFault => 2,
            Error::InvalidConfig(_)
            | Error::EmptyLibrary
            | Error::LibraryFull(_)
            | Error::MalformedCapture
            | Error::CaptureTooLong { .. } => 3,
        }
    }
}
