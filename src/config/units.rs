//! Unit types for motor quantities.
//!
//! Keeps step counts and inter-step delays apart at compile time.

use serde::Deserialize;

/// Motor position in steps (absolute from origin).
///
/// Uses i64 for unlimited range in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Steps(pub i64);

impl Steps {
    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Signed distance from `self` to `target`, `None` on overflow.
    #[inline]
    pub fn distance_to(self, target: Steps) -> Option<i64> {
        target.0.checked_sub(self.0)
    }
}

/// Delay between two commutation writes, in milliseconds.
///
/// Too short a delay makes the rotor miss steps or stall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct StepDelay(pub u32);

impl StepDelay {
    /// 20 ms, slow enough for most small geared steppers.
    pub const DEFAULT: Self = Self(20);

    /// Create a new delay in milliseconds.
    #[inline]
    pub const fn from_millis(ms: u32) -> Self {
        Self(ms)
    }

    /// Get the delay in milliseconds.
    #[inline]
    pub const fn as_millis(self) -> u32 {
        self.0
    }
}

impl Default for StepDelay {
    fn default() -> Self {
        Self::DEFAULT
    }
}
