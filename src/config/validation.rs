//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - Every line is within `0..=max_line`
/// - No line is assigned twice, within one motor or across motors
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    let mut seen: heapless::Vec<u8, { super::system::MAX_MOTORS * 4 }> = heapless::Vec::new();

    for (name, motor) in config.motors.iter() {
        for &pin in motor.pins.iter() {
            if !config.is_valid_line(pin) {
                return Err(Error::Config(ConfigError::InvalidPin {
                    motor: name.clone(),
                    pin,
                }));
            }
            if seen.contains(&pin) {
                return Err(Error::Config(ConfigError::DuplicatePin {
                    motor: name.clone(),
                    pin,
                }));
            }
            seen.push(pin).map_err(|_| Error::Config(ConfigError::TooManyMotors))?;
        }
    }

    Ok(())
}
