//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::convert::Infallible;
use std::rc::Rc;

use coil_stepper::error::{MotorError, Result};
use coil_stepper::gpio::OutputPort;
use coil_stepper::CommutationStep;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

/// Every level written to every line, shared between pins and the test.
#[derive(Debug, Clone, Default)]
pub struct Board {
    writes: Rc<RefCell<BTreeMap<u8, Vec<bool>>>>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pin recording onto `line`.
    pub fn pin(&self, line: u8) -> RecordingPin {
        self.writes.borrow_mut().entry(line).or_default();
        RecordingPin {
            line,
            board: self.clone(),
        }
    }

    /// Four pins on lines `0..4`.
    pub fn coils(&self) -> [RecordingPin; 4] {
        [self.pin(0), self.pin(1), self.pin(2), self.pin(3)]
    }

    /// Levels written to `line`, oldest first.
    pub fn levels(&self, line: u8) -> Vec<bool> {
        self.writes.borrow().get(&line).cloned().unwrap_or_default()
    }

    /// Last level written to `line`.
    pub fn level(&self, line: u8) -> Option<bool> {
        self.levels(line).last().copied()
    }

    /// Whole patterns written to `lines`, one per write of the first line.
    pub fn patterns(&self, lines: [u8; 4]) -> Vec<CommutationStep> {
        let columns: Vec<Vec<bool>> = lines.iter().map(|&l| self.levels(l)).collect();
        (0..columns[0].len())
            .map(|i| CommutationStep([columns[0][i], columns[1][i], columns[2][i], columns[3][i]]))
            .collect()
    }

    /// Last pattern written to `lines`.
    pub fn pattern(&self, lines: [u8; 4]) -> Option<CommutationStep> {
        self.patterns(lines).last().copied()
    }

    fn record(&self, line: u8, level: bool) {
        self.writes.borrow_mut().entry(line).or_default().push(level);
    }
}

/// Infallible output pin that records each level on its [`Board`].
#[derive(Debug)]
pub struct RecordingPin {
    line: u8,
    board: Board,
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.board.record(self.line, false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.board.record(self.line, true);
        Ok(())
    }
}

/// Pin error raised by [`FaultyPin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Pin that accepts `budget` writes and fails every write after that.
#[derive(Debug, Clone)]
pub struct FaultyPin {
    budget: Rc<Cell<usize>>,
}

impl FaultyPin {
    pub fn new(budget: usize) -> Self {
        Self {
            budget: Rc::new(Cell::new(budget)),
        }
    }
}

impl ErrorType for FaultyPin {
    type Error = PinFault;
}

impl OutputPin for FaultyPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.set_high()
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        match self.budget.get() {
            0 => Err(PinFault),
            n => {
                self.budget.set(n - 1);
                Ok(())
            }
        }
    }
}

/// Delay that adds up what it was asked to wait.
#[derive(Debug, Clone, Default)]
pub struct CountingDelay {
    total_ns: Rc<Cell<u64>>,
}

impl CountingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns.get() / 1_000_000
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ms) * 1_000_000);
    }
}

/// Port over a [`Board`] with lines `0..=max_line`. Opening a line writes
/// it low once.
#[derive(Debug, Clone)]
pub struct MockPort {
    pub board: Board,
    max_line: u8,
    broken: BTreeSet<u8>,
}

impl MockPort {
    pub fn new(max_line: u8) -> Self {
        Self {
            board: Board::new(),
            max_line,
            broken: BTreeSet::new(),
        }
    }

    /// Make `open` fail for `line` as if another process held it.
    pub fn with_busy_line(mut self, line: u8) -> Self {
        self.broken.insert(line);
        self
    }
}

impl OutputPort for MockPort {
    type Line = RecordingPin;

    fn is_valid_line(&self, line: u8) -> bool {
        line <= self.max_line
    }

    fn open(&mut self, line: u8) -> Result<RecordingPin> {
        if self.broken.contains(&line) {
            return Err(MotorError::PinConflict(line).into());
        }
        let mut pin = self.board.pin(line);
        let _ = pin.set_low();
        Ok(pin)
    }
}
