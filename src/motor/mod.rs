//! Motor module for coil-stepper.
//!
//! Provides the four-coil stepper driver, its commutation table and
//! position tracking.

mod builder;
mod coils;
pub mod commutation;
mod driver;
mod position;
mod state;

pub use builder::StepperMotorBuilder;
pub use coils::Coils;
pub use commutation::{phase_index, CommutationStep, COMMUTATION_TABLE, CYCLE_LEN};
pub use driver::StepperMotor;
pub use position::Position;
pub use state::Energization;
