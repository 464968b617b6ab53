//! Motor configuration from TOML.

use serde::Deserialize;

use super::units::StepDelay;

/// Number of coil lines driven per motor.
pub const COIL_COUNT: usize = 4;

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MotorConfig {
    /// Output lines in coil order: Coil_A1, Coil_A2, Coil_B1, Coil_B2.
    pub pins: [u8; COIL_COUNT],

    /// Delay between commutation writes.
    #[serde(default, rename = "step_delay_ms")]
    pub step_delay: StepDelay,

    /// Report every move at info level.
    #[serde(default)]
    pub verbose: bool,
}

impl MotorConfig {
    /// Create a configuration for the given lines with default timing.
    pub const fn new(pins: [u8; COIL_COUNT]) -> Self {
        Self {
            pins,
            step_delay: StepDelay::DEFAULT,
            verbose: false,
        }
    }

    /// Set the inter-step delay.
    pub const fn with_step_delay(mut self, step_delay: StepDelay) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Enable or disable move reports.
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
