//! Coil commutation table.
//!
//! One electrical cycle is six patterns over the coils
//! (Coil_A1, Coil_A2, Coil_B1, Coil_B2). Walking the table forward turns the
//! rotor forward, walking it backward turns it in reverse.

use core::fmt;

/// Number of entries in one electrical cycle.
pub const CYCLE_LEN: usize = 6;

/// Energization levels for the four coils, in wiring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommutationStep(pub [bool; 4]);

impl CommutationStep {
    /// All coils off: no holding torque.
    pub const RELEASED: Self = Self([false; 4]);

    /// Level for each coil in wiring order.
    #[inline]
    pub const fn levels(self) -> [bool; 4] {
        self.0
    }

    /// Whether any coil is energized.
    #[inline]
    pub fn is_energized(self) -> bool {
        self.0.iter().any(|&on| on)
    }

    /// Table index of this pattern, `None` for patterns outside the table.
    pub fn table_index(self) -> Option<usize> {
        COMMUTATION_TABLE.iter().position(|&step| step == self)
    }
}

impl fmt::Display for CommutationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a1, a2, b1, b2] = self.0;
        write!(
            f,
            "[{}, {}, {}, {}]",
            a1 as u8, a2 as u8, b1 as u8, b2 as u8
        )
    }
}

/// The six commutation patterns, index 0 energizing both A coils.
pub const COMMUTATION_TABLE: [CommutationStep; CYCLE_LEN] = [
    CommutationStep([true, true, false, false]),
    CommutationStep([true, false, true, false]),
    CommutationStep([false, true, true, false]),
    CommutationStep([false, true, false, true]),
    CommutationStep([false, false, true, true]),
    CommutationStep([true, false, false, true]),
];

/// Table index for an absolute position; negative positions wrap.
#[inline]
pub fn phase_index(position: i64) -> usize {
    // rem_euclid keeps the result in 0..CYCLE_LEN, so the cast is lossless
    position.rem_euclid(CYCLE_LEN as i64) as usize
}

/// Pattern that holds the rotor at `position`.
#[inline]
pub fn step_at(position: i64) -> CommutationStep {
    COMMUTATION_TABLE[phase_index(position)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_index_wraps_negative() {
        assert_eq!(phase_index(0), 0);
        assert_eq!(phase_index(5), 5);
        assert_eq!(phase_index(6), 0);
        assert_eq!(phase_index(-1), 5);
        assert_eq!(phase_index(-6), 0);
        assert_eq!(phase_index(-7), 5);
        assert_eq!(phase_index(i64::MIN), i64::MIN.rem_euclid(6) as usize);
    }

    #[test]
    fn test_table_literal() {
        let as_bits: heapless::Vec<[u8; 4], 6> = COMMUTATION_TABLE
            .iter()
            .map(|s| s.levels().map(u8::from))
            .collect();
        assert_eq!(
            as_bits.as_slice(),
            &[
                [1, 1, 0, 0],
                [1, 0, 1, 0],
                [0, 1, 1, 0],
                [0, 1, 0, 1],
                [0, 0, 1, 1],
                [1, 0, 0, 1],
            ]
        );
    }

    #[test]
    fn test_every_entry_has_two_coils_and_is_unique() {
        for (i, step) in COMMUTATION_TABLE.iter().enumerate() {
            assert_eq!(step.levels().iter().filter(|&&on| on).count(), 2);
            assert_eq!(step.table_index(), Some(i));
        }
        assert_eq!(CommutationStep::RELEASED.table_index(), None);
        assert!(!CommutationStep::RELEASED.is_energized());
    }

    #[test]
    fn test_step_at_matches_table() {
        assert_eq!(step_at(-1), COMMUTATION_TABLE[5]);
        assert_eq!(step_at(13), COMMUTATION_TABLE[1]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", COMMUTATION_TABLE[3]), "[0, 1, 0, 1]");
    }
}
