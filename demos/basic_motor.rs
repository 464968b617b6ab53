//! Basic motor control example.
//!
//! Drives one motor through a few moves on console pins that print their
//! level changes, then runs a short zig-zag on two motors.
//!
//! Run with: `cargo run --example basic_motor`

use coil_stepper::{zig_zag, Amplitude, StepperMotor};

/// Delay provider backed by `std::thread::sleep`.
#[derive(Clone, Copy)]
struct StdDelay;

impl embedded_hal::delay::DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Output pin that reports its level on stdout.
struct ConsolePin {
    label: &'static str,
    state: bool,
}

impl ConsolePin {
    fn new(label: &'static str) -> Self {
        Self { label, state: false }
    }

    fn set(&mut self, state: bool) {
        if self.state != state {
            println!("  {} -> {}", self.label, if state { "high" } else { "low" });
        }
        self.state = state;
    }
}

impl embedded_hal::digital::ErrorType for ConsolePin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for ConsolePin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }
}

fn coils(labels: [&'static str; 4]) -> [ConsolePin; 4] {
    labels.map(ConsolePin::new)
}

fn main() -> coil_stepper::Result<()> {
    println!("=== Basic Motor Control Example ===\n");

    let mut motor = StepperMotor::builder()
        .name("M0")
        .pins(coils(["A1", "A2", "B1", "B2"]))
        .delay(StdDelay)
        .step_delay_ms(5)
        .build()?;
    println!("{}", motor);

    println!("\nOne electrical cycle forward:");
    motor.move_steps(6)?;
    println!("{}", motor);

    println!("\nTo -3:");
    motor.set_steps(-3)?;
    println!("{}", motor);

    println!("\nRelease, lock, reset:");
    motor.release()?;
    motor.lock()?;
    motor.reset()?;
    println!("{}", motor);

    println!("\n=== Zig-zag ===\n");
    let mut pan = StepperMotor::builder()
        .name("pan")
        .pins(coils(["pan.A1", "pan.A2", "pan.B1", "pan.B2"]))
        .delay(StdDelay)
        .step_delay_ms(1)
        .build()?;

    zig_zag(&mut motor, &mut pan, Amplitude::new(2, 2), Amplitude::new(3, 1), None)?;
    println!("{}", motor);
    println!("{}", pan);

    motor.cleanup();
    pan.cleanup();
    Ok(())
}
