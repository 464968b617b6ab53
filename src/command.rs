//! Shell command parsing.
//!
//! Every command a front-end can issue is a variant of [`Command`]; the
//! single-motor operations share one variant tagged by [`Action`].

use core::str::{FromStr, SplitWhitespace};

use crate::choreography::Amplitude;
use crate::config::units::StepDelay;
use crate::config::MAX_MOTORS;
use crate::error::{truncated, ArgumentError, Result};

/// Motor code as written in the pin table (`M0`, `pan`, ...).
pub type MotorName = heapless::String<32>;

/// Motor codes given to a multi-motor command.
pub type MotorList = heapless::Vec<MotorName, MAX_MOTORS>;

/// Operation applied to each listed motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Return to the reference position.
    Reset,
    /// Switch the coils off.
    Release,
    /// Re-energize the coils in place.
    Lock,
    /// Make the current position the reference.
    Zero,
}

impl Action {
    /// Command keyword.
    pub fn name(self) -> &'static str {
        match self {
            Action::Reset => "reset",
            Action::Release => "release",
            Action::Lock => "lock",
            Action::Zero => "zero",
        }
    }
}

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Activate the listed motors, or the next free one when empty.
    New(MotorList),
    /// Deactivate the listed motors, or all of them when empty.
    Remove(MotorList),
    /// Show every active motor.
    List,
    /// Relative move.
    Move {
        /// Motor code.
        motor: MotorName,
        /// Signed step count.
        steps: i64,
    },
    /// Absolute move.
    Steps {
        /// Motor code.
        motor: MotorName,
        /// Target position.
        target: i64,
    },
    /// Apply `action` to each motor in turn.
    Apply {
        /// Operation to run.
        action: Action,
        /// At least one motor code.
        motors: MotorList,
    },
    /// Block for a number of milliseconds.
    Sleep {
        /// Duration.
        millis: u32,
    },
    /// Zig-zag pattern.
    ZigZag {
        /// Motor stepping along the pattern.
        motor_a: MotorName,
        /// Motor sweeping back and forth.
        motor_b: MotorName,
        /// Step and repetitions of `motor_a`.
        amp_a: Amplitude,
        /// Step and repetitions of `motor_b`.
        amp_b: Amplitude,
        /// Step delay override.
        delay: Option<StepDelay>,
    },
    /// Square spiral pattern.
    SquareSpiral {
        /// First motor.
        motor_a: MotorName,
        /// Second motor.
        motor_b: MotorName,
        /// Ring step and ring count.
        amplitude: Amplitude,
        /// Step delay override.
        delay: Option<StepDelay>,
    },
    /// Block until the user presses Enter.
    WaitKey,
    /// Print the command summary.
    Help,
    /// Clean up every motor and leave.
    Quit,
}

/// Command summary printed by `help`.
pub const HELP: &str = "\
new [motor...]                          activate motors (next free one if none given)
remove [motor...]                       deactivate motors (all if none given)
list                                    show active motors
move <motor> <steps>                    relative move
steps <motor> <target>                  absolute move
reset|release|lock|zero <motor...>      apply to each motor
sleep <ms>                              wait
waitkey                                 wait for Enter
zigzag <a> <b> <stepA> <repA> <stepB> <repB> [delay_ms]
spiral <a> <b> <step> <rep> [delay_ms]
help                                    this text
quit                                    release every motor and exit";

impl Command {
    /// Parse one input line. Blank lines give `None`.
    ///
    /// # Errors
    ///
    /// Returns an `ArgumentError` describing the first problem found.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut args = Args {
            tokens: line.split_whitespace(),
        };
        let keyword = match args.tokens.next() {
            Some(k) => k,
            None => return Ok(None),
        };

        let command = match keyword {
            "new" => Command::New(args.motors()?),
            "remove" => Command::Remove(args.motors()?),
            "list" => Command::List,
            "move" => Command::Move {
                motor: args.motor("motor")?,
                steps: args.integer("steps")?,
            },
            "steps" => Command::Steps {
                motor: args.motor("motor")?,
                target: args.integer("target")?,
            },
            "reset" => args.apply(Action::Reset)?,
            "release" => args.apply(Action::Release)?,
            "lock" => args.apply(Action::Lock)?,
            "zero" => args.apply(Action::Zero)?,
            "sleep" => Command::Sleep {
                millis: args.integer("milliseconds")?,
            },
            "zigzag" | "zig_zag" => Command::ZigZag {
                motor_a: args.motor("first motor")?,
                motor_b: args.motor("second motor")?,
                amp_a: args.amplitude()?,
                amp_b: args.amplitude()?,
                delay: args.delay()?,
            },
            "spiral" | "square_spiral" => Command::SquareSpiral {
                motor_a: args.motor("first motor")?,
                motor_b: args.motor("second motor")?,
                amplitude: args.amplitude()?,
                delay: args.delay()?,
            },
            "waitkey" => Command::WaitKey,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "EOF" => Command::Quit,
            other => return Err(ArgumentError::UnknownCommand(truncated(other)).into()),
        };

        args.finish()?;
        Ok(Some(command))
    }
}

struct Args<'a> {
    tokens: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn motor(&mut self, what: &'static str) -> Result<MotorName> {
        self.tokens
            .next()
            .map(truncated)
            .ok_or_else(|| ArgumentError::MissingArgument(what).into())
    }

    fn integer<T: FromStr>(&mut self, what: &'static str) -> Result<T> {
        let token = self
            .tokens
            .next()
            .ok_or(ArgumentError::MissingArgument(what))?;
        parse_integer(token)
    }

    fn amplitude(&mut self) -> Result<Amplitude> {
        Ok(Amplitude::new(
            self.integer("step")?,
            self.integer("repetitions")?,
        ))
    }

    fn delay(&mut self) -> Result<Option<StepDelay>> {
        self.tokens
            .next()
            .map(|token| parse_integer(token).map(StepDelay::from_millis))
            .transpose()
    }

    fn motors(&mut self) -> Result<MotorList> {
        let mut motors = MotorList::new();
        for token in self.tokens.by_ref() {
            motors
                .push(truncated(token))
                .map_err(|_| ArgumentError::UnexpectedArgument(truncated(token)))?;
        }
        Ok(motors)
    }

    fn apply(&mut self, action: Action) -> Result<Command> {
        let motors = self.motors()?;
        if motors.is_empty() {
            return Err(ArgumentError::MissingArgument("motor").into());
        }
        Ok(Command::Apply { action, motors })
    }

    fn finish(&mut self) -> Result<()> {
        match self.tokens.next() {
            Some(extra) => Err(ArgumentError::UnexpectedArgument(truncated(extra)).into()),
            None => Ok(()),
        }
    }
}

fn parse_integer<T: FromStr>(token: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| ArgumentError::InvalidInteger(truncated(token)).into())
}
