//! Motion module for coil-stepper.
//!
//! Provides rotation direction and the step sequence behind every move.

mod direction;
mod sequence;

pub use direction::Direction;
pub use sequence::{StepSequence, StepWrite};
