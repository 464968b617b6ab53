//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::error::{truncated, ConfigError, Result};

use super::motor::MotorConfig;

/// Maximum number of motors a configuration can name.
pub const MAX_MOTORS: usize = 8;

/// Highest BCM line number on a 40-pin Raspberry Pi header.
pub const BCM_MAX_LINE: u8 = 27;

/// Motor slots of the reference Raspberry Pi board, BCM numbering.
pub const RASPBERRY_PI_BCM: [(&str, [u8; 4]); 7] = [
    ("M0", [2, 3, 4, 17]),
    ("M1", [14, 15, 18, 23]),
    ("M2", [27, 22, 10, 9]),
    ("M3", [24, 25, 8, 7]),
    ("M4", [11, 0, 5, 6]),
    ("M5", [1, 12, 16, 20]),
    ("M6", [13, 19, 26, 21]),
];

const _: () = assert!(RASPBERRY_PI_BCM.len() <= MAX_MOTORS, "pin table exceeds MAX_MOTORS");

/// Root configuration structure from TOML.
///
/// Front-ends receive this at startup instead of consulting global pin
/// tables; the motor engine itself never sees line numbers.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Highest valid output line number on this board.
    #[serde(default = "default_max_line")]
    pub max_line: u8,

    /// Named motor configurations, in declaration order.
    #[serde(default)]
    pub motors: FnvIndexMap<String<32>, MotorConfig, MAX_MOTORS>,
}

fn default_max_line() -> u8 {
    BCM_MAX_LINE
}

impl SystemConfig {
    /// Pin table of the reference Raspberry Pi board (motors `M0`..`M6`).
    pub fn raspberry_pi() -> Self {
        let mut config = Self::default();
        for (name, pins) in RASPBERRY_PI_BCM {
            // Capacity is checked at compile time above
            if config.motors.insert(truncated(name), MotorConfig::new(pins)).is_err() {
                break;
            }
        }
        config
    }

    /// Add a motor, rejecting duplicate names and a full table.
    pub fn insert_motor(&mut self, name: &str, motor: MotorConfig) -> Result<()> {
        let key: String<32> = truncated(name);
        if self.motors.contains_key(&key) {
            return Err(ConfigError::DuplicateMotorName(key).into());
        }
        self.motors
            .insert(key, motor)
            .map_err(|_| ConfigError::TooManyMotors)?;
        Ok(())
    }

    /// Get a motor configuration by name.
    pub fn motor(&self, name: &str) -> Option<&MotorConfig> {
        self.motors
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all motor names in declaration order.
    pub fn motor_names(&self) -> impl Iterator<Item = &str> {
        self.motors.keys().map(|s| s.as_str())
    }

    /// Check whether `line` is within this board's range.
    #[inline]
    pub fn is_valid_line(&self, line: u8) -> bool {
        line <= self.max_line
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            max_line: BCM_MAX_LINE,
            motors: FnvIndexMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_raspberry_pi_table() {
        let config = SystemConfig::raspberry_pi();
        let names: heapless::Vec<&str, 8> = config.motor_names().collect();
        assert_eq!(names.as_slice(), &["M0", "M1", "M2", "M3", "M4", "M5", "M6"]);
        assert_eq!(config.motors.len(), RASPBERRY_PI_BCM.len());
        assert_eq!(config.motor("M2").unwrap().pins, [27, 22, 10, 9]);
        assert!(config.motor("M7").is_none());
    }

    #[test]
    fn test_insert_duplicate_motor() {
        let mut config = SystemConfig::raspberry_pi();
        let result = config.insert_motor("M0", MotorConfig::new([5, 6, 7, 8]));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::DuplicateMotorName(_)))
        ));
    }

    #[test]
    fn test_insert_until_full() {
        let mut config = SystemConfig::raspberry_pi();
        config.insert_motor("M7", MotorConfig::new([1, 2, 3, 4])).unwrap();
        let result = config.insert_motor("M8", MotorConfig::new([5, 6, 7, 8]));
        assert_eq!(result, Err(Error::Config(ConfigError::TooManyMotors)));
    }
}
