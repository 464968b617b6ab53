//! Raspberry Pi backend using BCM line numbers.

use ::rppal::gpio::{Error as GpioError, Gpio, OutputPin};

use crate::config::BCM_MAX_LINE;
use crate::error::{MotorError, Result};

use super::port::OutputPort;

/// GPIO lines of the Raspberry Pi header.
///
/// Dropping a line returns it to its previous mode, which leaves the coil
/// input floating.
pub struct RppalPort {
    gpio: Gpio,
}

impl RppalPort {
    /// Open the GPIO peripheral.
    pub fn new() -> Result<Self> {
        let gpio = Gpio::new().map_err(|e| {
            log::error!("cannot open GPIO: {}", e);
            MotorError::PinError
        })?;
        Ok(Self { gpio })
    }
}

impl OutputPort for RppalPort {
    type Line = OutputPin;

    fn is_valid_line(&self, line: u8) -> bool {
        line <= BCM_MAX_LINE
    }

    fn open(&mut self, line: u8) -> Result<OutputPin> {
        let pin = self.gpio.get(line).map_err(|e| match e {
            GpioError::PinUsed(l) => MotorError::PinConflict(l),
            GpioError::PinNotAvailable(l) => MotorError::InvalidPin(l),
            other => {
                log::error!("cannot open line {}: {}", line, other);
                MotorError::PinError
            }
        })?;
        Ok(pin.into_output_low())
    }
}
