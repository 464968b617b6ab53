//! Numbered output line provider.

use embedded_hal::digital::OutputPin;

use crate::error::Result;

/// Source of numbered digital output lines.
///
/// Implemented by a board backend (see `RppalPort` with the `rppal`
/// feature) or by a test double. Exclusive access is enforced by
/// [`LineRegistry`](super::LineRegistry), not by the port.
pub trait OutputPort {
    /// Line handle produced by this port.
    type Line: OutputPin;

    /// Whether `line` exists on this port.
    fn is_valid_line(&self, line: u8) -> bool;

    /// Open `line` for output, initially driven low.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::InvalidPin` for lines the hardware lacks and
    /// `MotorError::PinConflict` if the line is held outside this process.
    fn open(&mut self, line: u8) -> Result<Self::Line>;
}

impl<T: OutputPort + ?Sized> OutputPort for &mut T {
    type Line = T::Line;

    fn is_valid_line(&self, line: u8) -> bool {
        (**self).is_valid_line(line)
    }

    fn open(&mut self, line: u8) -> Result<Self::Line> {
        (**self).open(line)
    }
}
