//! Numbered output lines (std only).
//!
//! Maps board line numbers to embedded-hal pins with exclusive claims, and
//! builds motors from a [`SystemConfig`](crate::SystemConfig) pin table.

mod port;
mod registry;
#[cfg(feature = "rppal")]
mod raspberry;
mod system;

pub use port::OutputPort;
pub use registry::{ClaimedLine, LineRegistry};
#[cfg(feature = "rppal")]
pub use raspberry::RppalPort;
pub use system::{ClaimedMotor, MotorSystem};
