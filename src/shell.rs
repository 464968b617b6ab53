//! Line-oriented motor shell (std only).
//!
//! Reads [`Command`]s, dispatches them to the active motors of a
//! [`MotorSystem`], and prints one line per result.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::choreography::{square_spiral, zig_zag};
use crate::command::{Action, Command, MotorList, MotorName, HELP};
use crate::error::{ArgumentError, Result};
use crate::gpio::{ClaimedMotor, MotorSystem, OutputPort};

/// Greeting printed by [`Shell::run`].
pub const INTRO: &str = "A simple shell to control stepper motors";

/// Prompt printed before each command.
pub const PROMPT: &str = "stepper> ";

/// What a command printed, and whether the shell should stop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Lines to show the user.
    pub lines: Vec<String>,
    /// Set by `quit`.
    pub quit: bool,
    /// Set by `waitkey`: the caller should consume one line of input.
    pub wait_for_key: bool,
}

impl Reply {
    fn line(text: String) -> Self {
        Self {
            lines: vec![text],
            ..Self::default()
        }
    }
}

/// Interactive front-end over a configured board.
pub struct Shell<PORT, D>
where
    PORT: OutputPort,
    D: DelayNs + Clone,
{
    system: MotorSystem<PORT>,
    /// Prototype delay, cloned into each motor and used by `sleep`.
    delay: D,
    motors: BTreeMap<String, ClaimedMotor<PORT, D>>,
}

impl<PORT, D> Shell<PORT, D>
where
    PORT: OutputPort,
    D: DelayNs + Clone,
{
    /// Create a shell with no active motors.
    pub fn new(system: MotorSystem<PORT>, delay: D) -> Self {
        Self {
            system,
            delay,
            motors: BTreeMap::new(),
        }
    }

    /// The board this shell drives.
    pub fn system(&self) -> &MotorSystem<PORT> {
        &self.system
    }

    /// Get an active motor by name.
    pub fn motor(&self, name: &str) -> Option<&ClaimedMotor<PORT, D>> {
        self.motors.get(name)
    }

    /// Names of the active motors, sorted.
    pub fn active_motors(&self) -> impl Iterator<Item = &str> {
        self.motors.keys().map(String::as_str)
    }

    /// Parse and execute one input line.
    pub fn execute_line(&mut self, line: &str) -> Result<Reply> {
        match Command::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(Reply::default()),
        }
    }

    /// Execute one command.
    ///
    /// Arguments are checked before any motor is touched.
    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        match command {
            Command::New(names) => self.new_motors(names),
            Command::Remove(names) => self.remove_motors(names),
            Command::List => Ok(self.list()),
            Command::Move { motor, steps } => {
                self.active(&motor)?.move_steps(steps)?;
                Ok(Reply::line(format!("Moving motor {} {} steps", motor, steps)))
            }
            Command::Steps { motor, target } => {
                self.active(&motor)?.set_steps(target)?;
                Ok(Reply::line(format!("Moving motor {} to {}", motor, target)))
            }
            Command::Apply { action, motors } => self.apply(action, motors),
            Command::Sleep { millis } => {
                self.delay.delay_ms(millis);
                Ok(Reply::line(format!("Waited {} milliseconds", millis)))
            }
            Command::ZigZag {
                motor_a,
                motor_b,
                amp_a,
                amp_b,
                delay,
            } => {
                self.with_pair(&motor_a, &motor_b, |a, b| zig_zag(a, b, amp_a, amp_b, delay))?;
                Ok(Reply::line(format!("Zig-zag on {} and {} done", motor_a, motor_b)))
            }
            Command::SquareSpiral {
                motor_a,
                motor_b,
                amplitude,
                delay,
            } => {
                self.with_pair(&motor_a, &motor_b, |a, b| square_spiral(a, b, amplitude, delay))?;
                Ok(Reply::line(format!("Square spiral on {} and {} done", motor_a, motor_b)))
            }
            Command::WaitKey => Ok(Reply {
                wait_for_key: true,
                ..Reply::default()
            }),
            Command::Help => Ok(Reply {
                lines: HELP.lines().map(str::to_owned).collect(),
                ..Reply::default()
            }),
            Command::Quit => {
                self.shutdown();
                Ok(Reply {
                    lines: vec!["quitting".to_owned()],
                    quit: true,
                    ..Reply::default()
                })
            }
        }
    }

    /// Read commands until `quit` or end of input, then clean up.
    ///
    /// Command errors are printed and the loop goes on; only I/O errors
    /// end it early. `waitkey` swallows the next input line.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "{}", INTRO)?;
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut lines = input.lines();
        while let Some(line) = lines.next() {
            let line = line?;
            match self.execute_line(&line) {
                Ok(reply) => {
                    for text in &reply.lines {
                        writeln!(output, "{}", text)?;
                    }
                    if reply.quit {
                        return Ok(());
                    }
                    if reply.wait_for_key {
                        // End of input counts as a key press
                        lines.next().transpose()?;
                    }
                }
                Err(e) => {
                    warn!("command '{}' failed: {}", line.trim(), e);
                    writeln!(output, "{}", e)?;
                }
            }
            write!(output, "{}", PROMPT)?;
            output.flush()?;
        }

        self.shutdown();
        writeln!(output, "quitting")?;
        Ok(())
    }

    /// Clean up every active motor, releasing its lines.
    pub fn shutdown(&mut self) {
        for (name, mut motor) in std::mem::take(&mut self.motors) {
            motor.cleanup();
            info!("motor {} removed", name);
        }
    }

    fn new_motors(&mut self, names: MotorList) -> Result<Reply> {
        let names: Vec<String> = if names.is_empty() {
            let free = self
                .system
                .motor_names()
                .find(|name| !self.motors.contains_key(*name))
                .ok_or(ArgumentError::NoFreeMotor)?;
            vec![free.to_owned()]
        } else {
            for (i, name) in names.iter().enumerate() {
                if !self.system.has_motor(name) {
                    return Err(ArgumentError::UnknownMotor(name.clone()).into());
                }
                if self.motors.contains_key(name.as_str()) {
                    return Err(ArgumentError::MotorAlreadyActive(name.clone()).into());
                }
                if names[..i].contains(name) {
                    return Err(ArgumentError::SameMotor(name.clone()).into());
                }
            }
            names.iter().map(|n| n.to_string()).collect()
        };

        // All or nothing: claimed motors are dropped, freeing their lines,
        // if a later claim fails
        let mut claimed = Vec::with_capacity(names.len());
        for name in names {
            let motor = self.system.claim_motor(&name, self.delay.clone())?;
            claimed.push((name, motor));
        }

        let mut reply = Reply::default();
        for (name, motor) in claimed {
            let pins = self
                .system
                .motor_config(&name)
                .map(|m| m.pins)
                .unwrap_or_default();
            reply.lines.push(format!("New motor {} at pins {:?}", name, pins));
            self.motors.insert(name, motor);
        }
        Ok(reply)
    }

    fn remove_motors(&mut self, names: MotorList) -> Result<Reply> {
        if self.motors.is_empty() {
            return Ok(Reply::line("No motors listed".to_owned()));
        }

        let names: Vec<String> = if names.is_empty() {
            self.motors.keys().rev().cloned().collect()
        } else {
            self.check_active(&names)?;
            names.iter().map(|n| n.to_string()).collect()
        };

        let mut reply = Reply::default();
        for name in names {
            if let Some(mut motor) = self.motors.remove(&name) {
                motor.cleanup();
                reply.lines.push(format!("Removed motor {}", name));
            }
        }
        Ok(reply)
    }

    fn list(&self) -> Reply {
        if self.motors.is_empty() {
            return Reply::line("No motors listed".to_owned());
        }
        Reply {
            lines: self.motors.values().map(|m| m.to_string()).collect(),
            ..Reply::default()
        }
    }

    fn apply(&mut self, action: Action, names: MotorList) -> Result<Reply> {
        self.check_active(&names)?;

        let mut reply = Reply::default();
        for name in &names {
            let motor = self.active(name)?;
            match action {
                Action::Reset => motor.reset()?,
                Action::Release => motor.release()?,
                Action::Lock => motor.lock()?,
                Action::Zero => motor.zero()?,
            }
            reply.lines.push(format!("{} motor {}", action.name(), name));
        }
        Ok(reply)
    }

    /// Run `f` on two distinct active motors.
    fn with_pair<F>(&mut self, name_a: &MotorName, name_b: &MotorName, f: F) -> Result<()>
    where
        F: FnOnce(&mut ClaimedMotor<PORT, D>, &mut ClaimedMotor<PORT, D>) -> Result<()>,
    {
        if name_a == name_b {
            return Err(ArgumentError::SameMotor(name_a.clone()).into());
        }
        self.active(name_a)?;
        self.active(name_b)?;

        // Both present, checked above
        let (Some(mut a), Some(mut b)) = (
            self.motors.remove(name_a.as_str()),
            self.motors.remove(name_b.as_str()),
        ) else {
            return Err(ArgumentError::MotorNotActive(name_a.clone()).into());
        };

        let result = f(&mut a, &mut b);
        self.motors.insert(name_a.to_string(), a);
        self.motors.insert(name_b.to_string(), b);
        result
    }

    fn check_active(&self, names: &MotorList) -> Result<()> {
        for name in names {
            if !self.system.has_motor(name) {
                return Err(ArgumentError::UnknownMotor(name.clone()).into());
            }
            if !self.motors.contains_key(name.as_str()) {
                return Err(ArgumentError::MotorNotActive(name.clone()).into());
            }
        }
        Ok(())
    }

    fn active(&mut self, name: &MotorName) -> Result<&mut ClaimedMotor<PORT, D>> {
        if !self.system.has_motor(name) {
            return Err(ArgumentError::UnknownMotor(name.clone()).into());
        }
        self.motors
            .get_mut(name.as_str())
            .ok_or_else(|| ArgumentError::MotorNotActive(name.clone()).into())
    }
}

impl<PORT, D> Drop for Shell<PORT, D>
where
    PORT: OutputPort,
    D: DelayNs + Clone,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}
