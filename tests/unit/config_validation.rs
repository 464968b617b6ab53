//! Unit tests for configuration validation.

use coil_stepper::config::{validate_config, MotorConfig, SystemConfig};
use coil_stepper::error::{ConfigError, Error};

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let toml_str = r#"
[motors.stepper1]
pins = [2, 3, 4, 17]
step_delay_ms = 10

[motors.stepper2]
pins = [14, 15, 18, 23]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a line repeated within one motor.
#[test]
fn test_line_repeated_within_motor() {
    let mut config = SystemConfig::default();
    config.insert_motor("stepper1", MotorConfig::new([2, 3, 2, 17])).unwrap();

    let result = validate_config(&config);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::DuplicatePin { pin: 2, .. }))
    ));
}

/// Test validation fails for a line used by two motors.
#[test]
fn test_line_shared_between_motors() {
    let mut config = SystemConfig::raspberry_pi();
    config.insert_motor("extra", MotorConfig::new([5, 20, 21, 22])).unwrap();

    let result = validate_config(&config);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::DuplicatePin { .. }))
    ));
}

/// Test that max_line widens the valid range.
#[test]
fn test_max_line_bounds() {
    let toml_str = r#"
max_line = 40

[motors.wide]
pins = [37, 38, 39, 40]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());

    let narrow = SystemConfig {
        max_line: 39,
        ..config
    };
    let result = validate_config(&narrow);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidPin { pin: 40, .. }))
    ));
}

/// Test that an empty configuration is valid.
#[test]
fn test_empty_config() {
    let config: SystemConfig = toml::from_str("").expect("Failed to parse TOML");
    assert!(config.motors.is_empty());
    assert!(validate_config(&config).is_ok());
}
