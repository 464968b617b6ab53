//! The four coil output lines of one motor.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::MotorError;

use super::commutation::CommutationStep;

/// Output lines in wiring order: Coil_A1, Coil_A2, Coil_B1, Coil_B2.
#[derive(Debug)]
pub struct Coils<P: OutputPin> {
    pins: [P; 4],
}

impl<P: OutputPin> Coils<P> {
    /// Bind four output lines.
    pub fn new(pins: [P; 4]) -> Self {
        Self { pins }
    }

    /// Drive every line to the level given by `step`.
    ///
    /// Stops at the first failing line; lines before it already carry the
    /// new level.
    pub fn write(&mut self, step: CommutationStep) -> Result<(), MotorError> {
        for (pin, level) in self.pins.iter_mut().zip(step.levels()) {
            pin.set_state(PinState::from(level))
                .map_err(|_| MotorError::PinError)?;
        }
        Ok(())
    }
}
