//! Unit tests for configuration parsing.

use coil_stepper::config::{parse_config, SystemConfig, RASPBERRY_PI_BCM};
use coil_stepper::error::{ConfigError, Error};
use coil_stepper::StepperMotorBuilder;
use embedded_hal_mock::eh1::delay::NoopDelay;

use crate::common::{Board, RecordingPin};

/// The reference board written out as TOML.
const REFERENCE_BOARD: &str = r#"
[motors.M0]
pins = [2, 3, 4, 17]

[motors.M1]
pins = [14, 15, 18, 23]

[motors.M2]
pins = [27, 22, 10, 9]

[motors.M3]
pins = [24, 25, 8, 7]

[motors.M4]
pins = [11, 0, 5, 6]

[motors.M5]
pins = [1, 12, 16, 20]

[motors.M6]
pins = [13, 19, 26, 21]
"#;

/// Test that the reference board parses to the built-in table.
#[test]
fn test_reference_board_matches_builtin_table() {
    let parsed = parse_config(REFERENCE_BOARD).expect("Failed to parse TOML");
    let builtin = SystemConfig::raspberry_pi();

    assert_eq!(parsed.max_line, builtin.max_line);
    for (name, pins) in RASPBERRY_PI_BCM {
        assert_eq!(parsed.motor(name).unwrap().pins, pins);
        assert_eq!(builtin.motor(name), parsed.motor(name));
    }
}

/// Test that plain serde parsing skips validation.
#[test]
fn test_toml_from_str_does_not_validate() {
    let toml_str = r#"
[motors.M0]
pins = [2, 3, 4, 99]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(config.motor("M0").unwrap().pins[3], 99);
    assert!(parse_config(toml_str).is_err());
}

/// Test that a non-integer delay is a parse error.
#[test]
fn test_step_delay_must_be_an_integer() {
    let toml_str = r#"
[motors.M0]
pins = [2, 3, 4, 17]
step_delay_ms = "fast"
"#;

    assert!(matches!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test building a motor straight from a parsed configuration.
#[test]
fn test_builder_from_config() {
    let toml_str = r#"
[motors.pan]
pins = [5, 6, 13, 19]
step_delay_ms = 3
verbose = true
"#;
    let config = parse_config(toml_str).unwrap();
    let board = Board::new();

    let motor = StepperMotorBuilder::<RecordingPin, NoopDelay>::new()
        .from_config(&config, "pan")
        .unwrap()
        .pins(board.coils())
        .delay(NoopDelay::new())
        .build()
        .unwrap();

    assert_eq!(motor.name(), "pan");
    assert_eq!(motor.step_delay().as_millis(), 3);
    assert!(motor.is_verbose());
}

/// Test that looking up a missing motor fails.
#[test]
fn test_builder_from_config_unknown_motor() {
    let config = SystemConfig::raspberry_pi();
    let result = StepperMotorBuilder::<RecordingPin, NoopDelay>::new().from_config(&config, "tilt");

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MotorNotFound(_)))
    ));
}
