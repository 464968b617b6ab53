//! Exclusive claims on numbered output lines.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use embedded_hal::digital::{ErrorType, OutputPin};
use log::debug;

use crate::error::{MotorError, Result};

use super::port::OutputPort;

/// Set of lines currently held by live motors.
///
/// Cloning shares the same set, so every clone sees every claim. A claim
/// lasts as long as its [`ClaimedLine`].
#[derive(Debug, Clone, Default)]
pub struct LineRegistry {
    claimed: Arc<Mutex<BTreeSet<u8>>>,
}

impl LineRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `line` is currently claimed.
    pub fn is_claimed(&self, line: u8) -> bool {
        self.claims().contains(&line)
    }

    /// All currently claimed lines, ascending.
    pub fn claimed_lines(&self) -> Vec<u8> {
        self.claims().iter().copied().collect()
    }

    /// Claim `line` and open it on `port`.
    ///
    /// # Errors
    ///
    /// - `MotorError::InvalidPin` if the port has no such line
    /// - `MotorError::PinConflict` if a live claim already holds it
    /// - any error from `OutputPort::open`, after which the claim is undone
    pub fn claim<PORT: OutputPort>(
        &self,
        port: &mut PORT,
        line: u8,
    ) -> Result<ClaimedLine<PORT::Line>> {
        if !port.is_valid_line(line) {
            return Err(MotorError::InvalidPin(line).into());
        }
        if !self.claims().insert(line) {
            return Err(MotorError::PinConflict(line).into());
        }

        match port.open(line) {
            Ok(pin) => {
                debug!("line {} claimed", line);
                Ok(ClaimedLine {
                    line,
                    pin,
                    registry: self.clone(),
                })
            }
            Err(e) => {
                self.claims().remove(&line);
                Err(e)
            }
        }
    }

    /// Claim the four coil lines of one motor.
    ///
    /// All or nothing: if any line fails, the lines already claimed are
    /// released before returning.
    pub fn claim_coils<PORT: OutputPort>(
        &self,
        port: &mut PORT,
        lines: [u8; 4],
    ) -> Result<[ClaimedLine<PORT::Line>; 4]> {
        let [a1, a2, b1, b2] = lines;
        let a1 = self.claim(port, a1)?;
        let a2 = self.claim(port, a2)?;
        let b1 = self.claim(port, b1)?;
        let b2 = self.claim(port, b2)?;
        Ok([a1, a2, b1, b2])
    }

    fn claims(&self) -> MutexGuard<'_, BTreeSet<u8>> {
        // The set stays consistent even if a holder panicked
        self.claimed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Output line held exclusively until dropped.
#[derive(Debug)]
pub struct ClaimedLine<P> {
    line: u8,
    pin: P,
    registry: LineRegistry,
}

impl<P> ClaimedLine<P> {
    /// Line number.
    #[inline]
    pub fn line(&self) -> u8 {
        self.line
    }
}

impl<P: OutputPin> ErrorType for ClaimedLine<P> {
    type Error = P::Error;
}

impl<P: OutputPin> OutputPin for ClaimedLine<P> {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.pin.set_low()
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.pin.set_high()
    }
}

impl<P> Drop for ClaimedLine<P> {
    fn drop(&mut self) {
        self.registry.claims().remove(&self.line);
        debug!("line {} released", self.line);
    }
}
