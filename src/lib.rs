#![warn(missing_docs)]
//! A 9x9 Sudoku solving engine.
//!
//! Constraint propagation (naked and hidden singles) is driven to a fixed
//! point; when logic alone stalls, a backtracking search guided by the
//! Minimum Remaining Values heuristic branches on cloned board states. An
//! independent validator checks completed grids.

/// The `solver` module contains the solving engine: the board and
/// candidate types, the constraint propagator, the search driver, puzzle
/// parsing and the solution validator.
pub mod solver;
