//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{truncated, ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use coil_stepper::load_config;
///
/// let config = load_config("board.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::Config(ConfigError::IoError(truncated(&e.to_string()))))?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(truncated(e.message()))))?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[motors.M0]
pins = [2, 3, 4, 17]
"#;

        let config = parse_config(toml).unwrap();
        let motor = config.motor("M0").unwrap();
        assert_eq!(motor.pins, [2, 3, 4, 17]);
        assert_eq!(motor.step_delay.as_millis(), 20);
        assert!(!motor.verbose);
        assert_eq!(config.max_line, 27);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
max_line = 53

[motors.pan]
pins = [40, 41, 42, 43]
step_delay_ms = 5
verbose = true

[motors.tilt]
pins = [14, 15, 18, 23]
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.max_line, 53);
        let pan = config.motor("pan").unwrap();
        assert_eq!(pan.step_delay.as_millis(), 5);
        assert!(pan.verbose);
        let names: Vec<_> = config.motor_names().collect();
        assert_eq!(names, vec!["pan", "tilt"]);
    }

    #[test]
    fn test_parse_rejects_wrong_pin_count() {
        let toml = r#"
[motors.M0]
pins = [2, 3, 4]
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_parse_runs_validation() {
        let toml = r#"
[motors.M0]
pins = [2, 3, 4, 17]

[motors.M1]
pins = [17, 27, 10, 9]
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::DuplicatePin { pin: 17, .. }))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/coil-stepper.toml");
        assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
    }
}
