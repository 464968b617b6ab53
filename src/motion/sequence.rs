//! Step sequencing - turns a relative move into ordered coil writes.

use crate::motor::commutation::{step_at, CommutationStep};

use super::direction::Direction;

/// One commutation write within a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepWrite {
    /// Absolute position once this write has been held for the step delay.
    pub position: i64,
    /// Pattern to drive onto the coils.
    pub pattern: CommutationStep,
}

/// Iterator over the writes of a single relative move.
///
/// Yields exactly `|steps|` items; each pattern is one table slot away from
/// the previous one in the direction of travel.
#[derive(Debug, Clone)]
pub struct StepSequence {
    /// Position the next write will reach.
    next_position: i64,
    /// Writes left to yield.
    remaining: u64,
    direction: Direction,
}

impl StepSequence {
    /// Plan a move of `steps` starting at `start`.
    pub fn new(start: i64, steps: i64) -> Self {
        let direction = Direction::from_steps(steps);
        Self {
            next_position: start.wrapping_add(direction.sign()),
            remaining: steps.unsigned_abs(),
            direction,
        }
    }

    /// Direction of travel.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Check if every write has been yielded.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

impl Iterator for StepSequence {
    type Item = StepWrite;

    fn next(&mut self) -> Option<StepWrite> {
        if self.remaining == 0 {
            return None;
        }

        let write = StepWrite {
            position: self.next_position,
            pattern: step_at(self.next_position),
        };
        self.remaining -= 1;
        self.next_position = self.next_position.wrapping_add(self.direction.sign());
        Some(write)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::commutation::{phase_index, COMMUTATION_TABLE};

    #[test]
    fn test_forward_full_cycle() {
        let writes: heapless::Vec<StepWrite, 8> = StepSequence::new(0, 6).collect();
        assert_eq!(writes.len(), 6);
        for (i, write) in writes.iter().enumerate() {
            assert_eq!(write.position, i as i64 + 1);
            assert_eq!(write.pattern, COMMUTATION_TABLE[(i + 1) % 6]);
        }
        assert_eq!(writes[5].pattern, COMMUTATION_TABLE[0]);
    }

    #[test]
    fn test_reverse_from_negative_start() {
        let positions: heapless::Vec<i64, 4> =
            StepSequence::new(-4, -3).map(|w| w.position).collect();
        assert_eq!(positions.as_slice(), &[-5, -6, -7]);
    }

    #[test]
    fn test_zero_steps_is_empty() {
        let mut seq = StepSequence::new(17, 0);
        assert!(seq.is_complete());
        assert_eq!(seq.next(), None);
    }

    #[test]
    fn test_consecutive_writes_are_one_slot_apart() {
        for &(start, steps) in &[(0i64, 13i64), (5, -20), (-9, 7)] {
            let mut previous = phase_index(start);
            let sign = steps.signum();
            for write in StepSequence::new(start, steps) {
                let index = write.pattern.table_index().unwrap();
                assert_eq!(index as i64, (previous as i64 + sign).rem_euclid(6));
                previous = index;
            }
        }
    }
}
