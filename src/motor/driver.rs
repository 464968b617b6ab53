//! Stepper motor driver.
//!
//! Generic over embedded-hal 1.0 output pins and delay provider.

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, info, trace, warn};

use crate::config::units::{StepDelay, Steps};
use crate::error::{ArgumentError, MotorError, Result};
use crate::motion::StepSequence;

use super::builder::StepperMotorBuilder;
use super::coils::Coils;
use super::commutation::{CommutationStep, COMMUTATION_TABLE, CYCLE_LEN};
use super::position::Position;
use super::state::Energization;

/// Four-coil stepper motor driver.
///
/// Generic over:
/// - `P`: coil output pin type (must implement `OutputPin`)
/// - `D`: delay provider (must implement `DelayNs`)
///
/// The motor owns its four lines from construction until [`cleanup`], which
/// also runs when the motor is dropped.
///
/// [`cleanup`]: StepperMotor::cleanup
pub struct StepperMotor<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Coil lines; `None` once cleaned up.
    coils: Option<Coils<P>>,

    /// Delay provider for step timing.
    delay: D,

    /// Current absolute position.
    position: Position,

    /// Last pattern successfully written to the coils.
    current: CommutationStep,

    /// Whether the coils are holding.
    energization: Energization,

    /// Delay held after every commutation write.
    step_delay: StepDelay,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,

    /// Report moves at info level.
    verbose: bool,
}

impl<P, D> StepperMotor<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Bind the coils, assert table entry 0 and release.
    ///
    /// The motor starts at position 0 with no holding torque.
    pub(crate) fn new(
        pins: [P; 4],
        delay: D,
        name: heapless::String<32>,
        step_delay: StepDelay,
        verbose: bool,
    ) -> Result<Self> {
        let mut motor = Self {
            coils: Some(Coils::new(pins)),
            delay,
            position: Position::new(),
            current: CommutationStep::RELEASED,
            energization: Energization::Released,
            step_delay,
            name,
            verbose,
        };

        motor.write(COMMUTATION_TABLE[0])?;
        motor.release()?;
        debug!("{}: coils bound, step delay {} ms", motor.name, step_delay.as_millis());

        Ok(motor)
    }

    /// Start building a motor.
    pub fn builder() -> StepperMotorBuilder<P, D> {
        StepperMotorBuilder::new()
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Steps taken from the reference position.
    #[inline]
    pub fn steps(&self) -> i64 {
        self.position.steps().value()
    }

    /// Pattern currently driven onto the coils.
    #[inline]
    pub fn current_state(&self) -> CommutationStep {
        self.current
    }

    /// Commutation table index derived from the position.
    #[inline]
    pub fn phase(&self) -> usize {
        self.position.phase()
    }

    /// Whether the coils are holding the rotor.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.energization.is_locked()
    }

    /// Get the energization state.
    #[inline]
    pub fn energization(&self) -> Energization {
        self.energization
    }

    /// Delay held after each step.
    #[inline]
    pub fn step_delay(&self) -> StepDelay {
        self.step_delay
    }

    /// Change the delay held after each step.
    #[inline]
    pub fn set_step_delay(&mut self, step_delay: StepDelay) {
        self.step_delay = step_delay;
    }

    /// Whether moves are reported at info level.
    #[inline]
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Enable or disable move reports.
    #[inline]
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Whether the motor still owns its lines.
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.coils.is_some()
    }

    /// Move `steps` steps; negative values turn the motor backwards.
    ///
    /// Blocks for the step delay after every write. On a line failure the
    /// remaining steps are abandoned and the position reflects the steps
    /// already completed.
    ///
    /// # Errors
    ///
    /// - `MotorError::Detached` after [`cleanup`](Self::cleanup)
    /// - `ArgumentError::Overflow` if the target position does not fit
    /// - `MotorError::PinError` if a line write fails
    pub fn move_steps(&mut self, steps: i64) -> Result<()> {
        self.ensure_attached()?;
        if steps == 0 {
            return Ok(());
        }
        self.steps()
            .checked_add(steps)
            .ok_or(ArgumentError::Overflow)?;

        if self.verbose {
            info!("{}, moving {} steps", self, steps);
        } else {
            debug!("{}: moving {} steps from {}", self.name, steps, self.steps());
        }

        let sequence = StepSequence::new(self.steps(), steps);
        let sign = sequence.direction().sign();
        for write in sequence {
            self.write(write.pattern)?;
            // The coils hold from the first pattern on, even if a later write fails
            self.energization = Energization::Locked;
            self.delay.delay_ms(self.step_delay.as_millis());
            self.position.move_steps(sign);
            trace!("{}: step to {} {}", self.name, write.position, write.pattern);
        }

        Ok(())
    }

    /// Move to an absolute position.
    ///
    /// # Errors
    ///
    /// Same as [`move_steps`](Self::move_steps).
    pub fn set_steps(&mut self, target: i64) -> Result<()> {
        let distance = self
            .position
            .steps_to(Steps(target))
            .ok_or(ArgumentError::Overflow)?;
        self.move_steps(distance)
    }

    /// Switch every coil off to save power. The position is kept.
    pub fn release(&mut self) -> Result<()> {
        self.write(CommutationStep::RELEASED)?;
        self.energization = Energization::Released;
        debug!("{}: released at {}", self.name, self.steps());
        Ok(())
    }

    /// Re-energize the coils on the current position without moving.
    pub fn lock(&mut self) -> Result<()> {
        self.write(self.position.holding_step())?;
        self.energization = Energization::Locked;
        debug!("{}: locked at {}", self.name, self.steps());
        Ok(())
    }

    /// Return to the reference position and hold there.
    pub fn reset(&mut self) -> Result<()> {
        let distance = self
            .steps()
            .checked_neg()
            .ok_or(ArgumentError::Overflow)?;
        if distance == 0 {
            self.lock()
        } else {
            self.move_steps(distance)
        }
    }

    /// Make the current position the reference and re-phase the coils.
    ///
    /// Steps one electrical cycle forward and back so the motor ends on
    /// table index 0 (both A coils on) at position 0.
    pub fn zero(&mut self) -> Result<()> {
        self.ensure_attached()?;
        self.position.set_origin();
        // CYCLE_LEN is a small constant
        let cycle = CYCLE_LEN as i64;
        self.move_steps(cycle)?;
        self.move_steps(-cycle)?;
        debug!("{}: zeroed", self.name);
        Ok(())
    }

    /// De-energize the coils and give up the lines.
    ///
    /// Safe to call any number of times; also runs on drop. Never fails: a
    /// line that cannot be driven low is logged and released anyway.
    pub fn cleanup(&mut self) {
        if let Some(mut coils) = self.coils.take() {
            if coils.write(CommutationStep::RELEASED).is_err() {
                warn!("{}: could not de-energize coils during cleanup", self.name);
            }
            self.current = CommutationStep::RELEASED;
            self.energization = Energization::Released;
            drop(coils);
            debug!("{}: lines released", self.name);
        }
    }

    fn ensure_attached(&self) -> Result<()> {
        if self.coils.is_some() {
            Ok(())
        } else {
            Err(MotorError::Detached.into())
        }
    }

    fn write(&mut self, step: CommutationStep) -> Result<()> {
        let coils = self.coils.as_mut().ok_or(MotorError::Detached)?;
        coils.write(step)?;
        self.current = step;
        Ok(())
    }
}

impl<P, D> Drop for StepperMotor<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn drop(&mut self) {
        self.cleanup();
    }
}

impl<P, D> fmt::Display for StepperMotor<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Motor {}: steps {}, coils {}, {}",
            self.name,
            self.steps(),
            self.current,
            self.energization
        )
    }
}

impl<P, D> fmt::Debug for StepperMotor<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepperMotor")
            .field("name", &self.name.as_str())
            .field("position", &self.steps())
            .field("current", &self.current)
            .field("energization", &self.energization)
            .field("step_delay_ms", &self.step_delay.as_millis())
            .field("attached", &self.is_attached())
            .finish()
    }
}
