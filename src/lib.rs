//! # coil-stepper
//!
//! Four-coil stepper motor sequencing with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Commutation table**: six-slot half-step cycle driving four coil lines
//! - **embedded-hal 1.0**: Uses `OutputPin` for the coils, `DelayNs` for timing
//! - **no_std compatible**: Motor engine and choreography work without std
//! - **Position tracking**: Signed step count from a movable reference
//! - **Exclusive lines**: Numbered lines are claimed once and freed on cleanup
//! - **Choreography**: Zig-zag and square spiral over two motors
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coil_stepper::StepperMotor;
//!
//! let mut motor = StepperMotor::builder()
//!     .name("M0")
//!     .pins([a1, a2, b1, b2])
//!     .delay(delay)
//!     .step_delay_ms(20)
//!     .build()?;
//!
//! motor.move_steps(6)?;
//! motor.reset()?;
//! motor.release()?;
//! ```
//!
//! With the `std` feature, motors can be claimed by name from a board pin
//! table through [`gpio::MotorSystem`], and driven interactively through
//! [`shell::Shell`].
//!
//! ## Feature Flags
//!
//! - `std` (default): TOML loading, line registry, motor system and shell
//! - `defmt`: Enables defmt formatting for embedded targets
//! - `rppal`: Raspberry Pi GPIO backend

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Core modules
pub mod choreography;
pub mod command;
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Board support (std only)
#[cfg(feature = "std")]
pub mod gpio;
#[cfg(feature = "std")]
pub mod shell;

// Re-exports for ergonomic API
pub use choreography::{square_spiral, zig_zag, Amplitude, Axis};
pub use command::{Action, Command};
pub use config::{validate_config, MotorConfig, SystemConfig};
pub use error::{Error, Result};
pub use motion::{Direction, StepSequence};
pub use motor::{
    CommutationStep, Energization, StepperMotor, StepperMotorBuilder, COMMUTATION_TABLE,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

#[cfg(feature = "std")]
pub use gpio::{MotorSystem, OutputPort};
#[cfg(feature = "std")]
pub use shell::Shell;

// Unit types
pub use config::units::{StepDelay, Steps};
