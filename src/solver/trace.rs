#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Observation hooks for the solving process.
//!
//! The engine reports every deduction and branch decision through a
//! [`Trace`]; the hooks have no effect on solving semantics. [`NoTrace`]
//! is the silent default, [`PrintTrace`] backs the CLI `--debug` flag.

use crate::solver::grid::Digit;
use core::fmt;

/// The kind of unit a hidden single was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// One of the nine rows.
    Row,
    /// One of the nine columns.
    Column,
    /// One of the nine 3x3 blocks.
    Block,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => write!(f, "row"),
            Self::Column => write!(f, "column"),
            Self::Block => write!(f, "block"),
        }
    }
}

/// Receives solving events.
pub trait Trace {
    /// An empty cell had exactly one candidate left and was committed.
    fn naked_single(&mut self, row: usize, col: usize, digit: Digit);

    /// `digit` had exactly one possible cell within `unit` and was committed.
    fn hidden_single(&mut self, unit: Unit, row: usize, col: usize, digit: Digit);

    /// The search driver is about to try `digit` in `(row, col)`.
    fn decision(&mut self, row: usize, col: usize, digit: Digit);
}

/// Silent trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoTrace;

impl Trace for NoTrace {
    fn naked_single(&mut self, _: usize, _: usize, _: Digit) {}
    fn hidden_single(&mut self, _: Unit, _: usize, _: usize, _: Digit) {}
    fn decision(&mut self, _: usize, _: usize, _: Digit) {}
}

/// Prints every event to stdout when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrintTrace {
    enabled: bool,
}

impl PrintTrace {
    /// A print trace that is silent unless `enabled`.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Trace for PrintTrace {
    fn naked_single(&mut self, row: usize, col: usize, digit: Digit) {
        if self.enabled {
            println!("naked single: ({row}, {col}) = {digit}");
        }
    }

    fn hidden_single(&mut self, unit: Unit, row: usize, col: usize, digit: Digit) {
        if self.enabled {
            println!("hidden single in {unit}: ({row}, {col}) = {digit}");
        }
    }

    fn decision(&mut self, row: usize, col: usize, digit: Digit) {
        if self.enabled {
            println!("trying ({row}, {col}) = {digit}");
        }
    }
}
