//! Motor system facade for configured multi-motor boards.
//!
//! Provides a high-level API for building motors from a board pin table.

use embedded_hal::delay::DelayNs;

use crate::config::{validate_config, MotorConfig, SystemConfig};
use crate::error::{truncated, ConfigError, Error, Result};
use crate::motor::{StepperMotor, StepperMotorBuilder};

use super::port::OutputPort;
use super::registry::{ClaimedLine, LineRegistry};

/// Motor built on registry-claimed lines of port `PORT`.
pub type ClaimedMotor<PORT, D> = StepperMotor<ClaimedLine<<PORT as OutputPort>::Line>, D>;

/// A facade for building stepper motors from a board configuration.
///
/// `MotorSystem` provides a high-level API for:
/// - Looking up motors by name in the pin table
/// - Claiming their lines with conflict detection
/// - Building ready-to-use, released motors
///
/// # Example
///
/// ```rust,ignore
/// use coil_stepper::gpio::MotorSystem;
/// use coil_stepper::SystemConfig;
///
/// let mut system = MotorSystem::new(SystemConfig::raspberry_pi(), port)?;
/// let mut m0 = system.claim_motor("M0", delay.clone())?;
/// let mut m1 = system.claim_motor("M1", delay)?;
/// coil_stepper::zig_zag(&mut m0, &mut m1, (5, 10).into(), (5, 10).into(), None)?;
/// ```
pub struct MotorSystem<PORT: OutputPort> {
    /// The board configuration.
    config: SystemConfig,
    /// Line provider.
    port: PORT,
    /// Claims shared by every motor built here.
    registry: LineRegistry,
}

impl<PORT: OutputPort> MotorSystem<PORT> {
    /// Create a new motor system from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: SystemConfig, port: PORT) -> Result<Self> {
        Self::with_registry(config, port, LineRegistry::new())
    }

    /// Create a motor system sharing an existing registry.
    pub fn with_registry(config: SystemConfig, port: PORT, registry: LineRegistry) -> Result<Self> {
        validate_config(&config)?;
        Ok(Self {
            config,
            port,
            registry,
        })
    }

    /// Get the system configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Get the line registry.
    pub fn registry(&self) -> &LineRegistry {
        &self.registry
    }

    /// Get a motor configuration by name.
    pub fn motor_config(&self, name: &str) -> Option<&MotorConfig> {
        self.config.motor(name)
    }

    /// Check if a motor name exists in the configuration.
    pub fn has_motor(&self, name: &str) -> bool {
        self.config.motor(name).is_some()
    }

    /// List all configured motor names.
    pub fn motor_names(&self) -> impl Iterator<Item = &str> {
        self.config.motor_names()
    }

    /// Check whether any line of a configured motor is currently claimed.
    pub fn is_claimed(&self, name: &str) -> bool {
        self.config
            .motor(name)
            .map(|m| m.pins.iter().any(|&pin| self.registry.is_claimed(pin)))
            .unwrap_or(false)
    }

    /// Claim a configured motor's lines and build it.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown, a line is invalid or
    /// already claimed, or the initial coil writes fail.
    pub fn claim_motor<D: DelayNs>(&mut self, name: &str, delay: D) -> Result<ClaimedMotor<PORT, D>> {
        let motor_config = self
            .config
            .motor(name)
            .ok_or_else(|| Error::Config(ConfigError::MotorNotFound(truncated(name))))?;

        let pins = self.registry.claim_coils(&mut self.port, motor_config.pins)?;

        StepperMotorBuilder::new()
            .name(name)
            .pins(pins)
            .delay(delay)
            .from_motor_config(motor_config)
            .build()
    }

    /// Claim arbitrary lines for a motor that is not in the pin table.
    pub fn claim_lines<D: DelayNs>(
        &mut self,
        name: &str,
        motor_config: &MotorConfig,
        delay: D,
    ) -> Result<ClaimedMotor<PORT, D>> {
        let pins = self.registry.claim_coils(&mut self.port, motor_config.pins)?;

        StepperMotorBuilder::new()
            .name(name)
            .pins(pins)
            .delay(delay)
            .from_motor_config(motor_config)
            .build()
    }
}
