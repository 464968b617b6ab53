//! Interactive shell on a Raspberry Pi.
//!
//! Reads commands from stdin and drives motors on the reference board's
//! BCM lines, or on the board described by the TOML file given as the
//! first argument.
//!
//! Run with: `cargo run --example shell --features rppal -- [board.toml]`

use std::io;

use coil_stepper::gpio::{MotorSystem, RppalPort};
use coil_stepper::shell::Shell;
use coil_stepper::{load_config, SystemConfig};
use embedded_hal::delay::DelayNs;
use rppal::hal::Delay;

/// Cloneable handle on rppal's delay, one per motor.
#[derive(Clone, Copy, Default)]
struct PiDelay;

impl DelayNs for PiDelay {
    fn delay_ns(&mut self, ns: u32) {
        Delay::new().delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        Delay::new().delay_ms(ms);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(path)?,
        None => SystemConfig::raspberry_pi(),
    };

    let system = MotorSystem::new(config, RppalPort::new()?)?;
    let mut shell = Shell::new(system, PiDelay);

    let stdin = io::stdin();
    shell.run(stdin.lock(), io::stdout())?;
    Ok(())
}
