//! Position tracking for stepper motors.
//!
//! Absolute position in steps, plus the commutation phase derived from it.

use crate::config::units::Steps;

use super::commutation::{phase_index, step_at, CommutationStep};

/// Motor position tracker.
///
/// The only source of truth for where the rotor is; the commutation phase is
/// always derived from it, never stored separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Current position in steps (from origin)
    steps: Steps,
}

impl Position {
    /// Create a position tracker at the origin.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current position in steps.
    #[inline]
    pub fn steps(&self) -> Steps {
        self.steps
    }

    /// Commutation table index for the current position.
    #[inline]
    pub fn phase(&self) -> usize {
        phase_index(self.steps.0)
    }

    /// Pattern that holds the rotor at the current position.
    #[inline]
    pub fn holding_step(&self) -> CommutationStep {
        step_at(self.steps.0)
    }

    /// Move by a number of steps.
    #[inline]
    pub fn move_steps(&mut self, delta: i64) {
        self.steps = Steps(self.steps.0 + delta);
    }

    /// Set current position as the new origin.
    #[inline]
    pub fn set_origin(&mut self) {
        self.steps = Steps::default();
    }

    /// Calculate steps needed to reach `target`, `None` on overflow.
    #[inline]
    pub fn steps_to(&self, target: Steps) -> Option<i64> {
        self.steps.distance_to(target)
    }
}
