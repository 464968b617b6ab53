//! Coil energization state.

use core::fmt;

/// Whether the coils currently hold the rotor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Energization {
    /// All coils off; the shaft turns freely if pushed.
    #[default]
    Released,
    /// Coils energized on the current phase; holding torque present.
    Locked,
}

impl Energization {
    /// State name for display/debugging.
    pub fn name(self) -> &'static str {
        match self {
            Energization::Released => "Released",
            Energization::Locked => "Locked",
        }
    }

    /// True when holding torque is applied.
    #[inline]
    pub fn is_locked(self) -> bool {
        self == Energization::Locked
    }
}

impl fmt::Display for Energization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
