//! Two-motor movement patterns.
//!
//! Patterns drive motors one at a time through the [`Axis`] trait and never
//! touch output lines themselves. Both patterns finish by returning each
//! motor to its reference position and releasing it.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::info;

use crate::config::units::StepDelay;
use crate::error::{ArgumentError, Result};
use crate::motor::StepperMotor;

/// Motor operations a movement pattern needs.
pub trait Axis {
    /// Steps taken from the reference position.
    fn steps(&self) -> i64;

    /// Relative move.
    fn move_steps(&mut self, steps: i64) -> Result<()>;

    /// Absolute move.
    fn set_steps(&mut self, target: i64) -> Result<()> {
        let distance = target
            .checked_sub(self.steps())
            .ok_or(ArgumentError::Overflow)?;
        self.move_steps(distance)
    }

    /// Return to the reference position and hold.
    fn reset(&mut self) -> Result<()>;

    /// Switch the coils off.
    fn release(&mut self) -> Result<()>;

    /// Change the inter-step delay.
    fn set_step_delay(&mut self, step_delay: StepDelay);
}

impl<P, D> Axis for StepperMotor<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn steps(&self) -> i64 {
        StepperMotor::steps(self)
    }

    fn move_steps(&mut self, steps: i64) -> Result<()> {
        StepperMotor::move_steps(self, steps)
    }

    fn set_steps(&mut self, target: i64) -> Result<()> {
        StepperMotor::set_steps(self, target)
    }

    fn reset(&mut self) -> Result<()> {
        StepperMotor::reset(self)
    }

    fn release(&mut self) -> Result<()> {
        StepperMotor::release(self)
    }

    fn set_step_delay(&mut self, step_delay: StepDelay) {
        StepperMotor::set_step_delay(self, step_delay)
    }
}

/// Step size and repetition count of one pattern axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Amplitude {
    /// Steps per iteration.
    pub step: i64,
    /// Number of iterations.
    pub repetitions: u32,
}

impl Amplitude {
    /// Create an amplitude.
    #[inline]
    pub const fn new(step: i64, repetitions: u32) -> Self {
        Self { step, repetitions }
    }

    /// `step * repetitions`, `None` on overflow.
    #[inline]
    pub fn span(self) -> Option<i64> {
        self.step.checked_mul(i64::from(self.repetitions))
    }
}

impl From<(i64, u32)> for Amplitude {
    fn from((step, repetitions): (i64, u32)) -> Self {
        Self::new(step, repetitions)
    }
}

/// Zig-zag over two motors.
///
/// Repeats `amp_a.repetitions` times:
/// 1. `motor_b` forward by `amp_b.step * amp_b.repetitions`
/// 2. `motor_a` forward by `amp_a.step`
/// 3. `motor_b` back by the same sweep
/// 4. `motor_a` forward by `amp_a.step`
///
/// then resets and releases both motors. `delay` replaces both motors' step
/// delay before the first move.
///
/// # Errors
///
/// `ArgumentError::Overflow` if any position would overflow, checked before
/// anything moves. Motor errors abort the pattern where it stands.
pub fn zig_zag<A: Axis, B: Axis>(
    motor_a: &mut A,
    motor_b: &mut B,
    amp_a: Amplitude,
    amp_b: Amplitude,
    delay: Option<StepDelay>,
) -> Result<()> {
    let sweep = amp_b.span().ok_or(ArgumentError::Overflow)?;
    let back = sweep.checked_neg().ok_or(ArgumentError::Overflow)?;
    motor_b
        .steps()
        .checked_add(sweep)
        .ok_or(ArgumentError::Overflow)?;
    amp_a
        .span()
        .and_then(|span| span.checked_mul(2))
        .and_then(|travel| motor_a.steps().checked_add(travel))
        .ok_or(ArgumentError::Overflow)?;

    apply_delay(motor_a, motor_b, delay);
    info!(
        "zig-zag: {} x ({} steps on A, {} steps sweep on B)",
        amp_a.repetitions, amp_a.step, sweep
    );

    for _ in 0..amp_a.repetitions {
        motor_b.move_steps(sweep)?;
        motor_a.move_steps(amp_a.step)?;
        motor_b.move_steps(back)?;
        motor_a.move_steps(amp_a.step)?;
    }

    finish(motor_a, motor_b)
}

/// Expanding square spiral over two motors.
///
/// For `i` in `1..=amplitude.repetitions`, with `k = i * amplitude.step`:
/// `motor_b` to `k`, `motor_a` to `k`, `motor_a` to `-k`, `motor_b` to `-k`
/// (absolute positions), then resets and releases both motors.
///
/// # Errors
///
/// `ArgumentError::Overflow` if the outermost ring does not fit, checked
/// before anything moves. Motor errors abort the pattern where it stands.
pub fn square_spiral<A: Axis, B: Axis>(
    motor_a: &mut A,
    motor_b: &mut B,
    amplitude: Amplitude,
    delay: Option<StepDelay>,
) -> Result<()> {
    amplitude
        .span()
        .and_then(i64::checked_neg)
        .ok_or(ArgumentError::Overflow)?;

    apply_delay(motor_a, motor_b, delay);
    info!(
        "square spiral: {} rings of {} steps",
        amplitude.repetitions, amplitude.step
    );

    for ring in 1..=i64::from(amplitude.repetitions) {
        // |ring * step| <= |span|, checked above
        let k = ring * amplitude.step;
        motor_b.set_steps(k)?;
        motor_a.set_steps(k)?;
        motor_a.set_steps(-k)?;
        motor_b.set_steps(-k)?;
    }

    finish(motor_a, motor_b)
}

fn apply_delay<A: Axis, B: Axis>(motor_a: &mut A, motor_b: &mut B, delay: Option<StepDelay>) {
    if let Some(step_delay) = delay {
        motor_a.set_step_delay(step_delay);
        motor_b.set_step_delay(step_delay);
    }
}

fn finish<A: Axis, B: Axis>(motor_a: &mut A, motor_b: &mut B) -> Result<()> {
    motor_a.reset()?;
    motor_b.reset()?;
    motor_a.release()?;
    motor_b.release()
}
