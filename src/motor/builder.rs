//! Builder pattern for StepperMotor.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::StepDelay;
use crate::config::{MotorConfig, SystemConfig};
use crate::error::{truncated, ConfigError, Error, Result};

use super::driver::StepperMotor;

/// Builder for creating StepperMotor instances.
pub struct StepperMotorBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pins: Option<[P; 4]>,
    delay: Option<D>,
    name: Option<heapless::String<32>>,
    step_delay: StepDelay,
    verbose: bool,
}

impl<P, D> Default for StepperMotorBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, D> StepperMotorBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            pins: None,
            delay: None,
            name: None,
            step_delay: StepDelay::DEFAULT,
            verbose: false,
        }
    }

    /// Set the coil pins in wiring order: Coil_A1, Coil_A2, Coil_B1, Coil_B2.
    pub fn pins(mut self, pins: [P; 4]) -> Self {
        self.pins = Some(pins);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(truncated(name));
        self
    }

    /// Set the delay held after each step, in milliseconds.
    pub fn step_delay_ms(mut self, ms: u32) -> Self {
        self.step_delay = StepDelay::from_millis(ms);
        self
    }

    /// Report moves at info level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Configure timing and reporting from a MotorConfig.
    ///
    /// Line numbers in the config are not used here; the caller supplies
    /// already-opened pins.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.step_delay = config.step_delay;
        self.verbose = config.verbose;
        self
    }

    /// Configure from SystemConfig by motor name.
    pub fn from_config(self, config: &SystemConfig, motor_name: &str) -> Result<Self> {
        let motor_config = config
            .motor(motor_name)
            .ok_or_else(|| Error::Config(ConfigError::MotorNotFound(truncated(motor_name))))?;

        Ok(self.name(motor_name).from_motor_config(motor_config))
    }

    /// Build the StepperMotor.
    ///
    /// The new motor is at position 0 with its coils released.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or the initial
    /// coil writes fail.
    pub fn build(self) -> Result<StepperMotor<P, D>> {
        let pins = self
            .pins
            .ok_or_else(|| Error::Config(ConfigError::ParseError(truncated("pins are required"))))?;

        let delay = self
            .delay
            .ok_or_else(|| Error::Config(ConfigError::ParseError(truncated("delay is required"))))?;

        let name = self.name.unwrap_or_else(|| truncated("motor"));

        StepperMotor::new(pins, delay, name, self.step_delay, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::Mock as PinMock;

    #[test]
    fn test_missing_pins() {
        let result = StepperMotorBuilder::<PinMock, NoopDelay>::new()
            .delay(NoopDelay::new())
            .build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_unknown_motor_in_config() {
        let config = SystemConfig::raspberry_pi();
        let result = StepperMotorBuilder::<PinMock, NoopDelay>::new().from_config(&config, "M9");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MotorNotFound(_)))
        ));
    }
}
