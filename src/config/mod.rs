//! Configuration module for coil-stepper.
//!
//! Provides board pin tables and per-motor timing, loaded from TOML files
//! (with `std` feature) or built in code.

mod motor;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::{MotorConfig, COIL_COUNT};
pub use system::{SystemConfig, BCM_MAX_LINE, MAX_MOTORS, RASPBERRY_PI_BCM};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{StepDelay, Steps};
