#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branch cell selection strategies.

use crate::solver::candidate::CandidateGrid;
use crate::solver::grid::Grid;

/// Picks the empty cell the search driver branches on when propagation
/// stalls.
pub trait CellSelection {
    /// A fresh selector.
    fn new() -> Self;

    /// The cell to branch on, or `None` when no empty cell remains.
    fn pick(&self, grid: &Grid, candidates: &CandidateGrid) -> Option<(usize, usize)>;
}

/// Minimum Remaining Values: the empty cell with the fewest candidates.
///
/// This is the single most important pruning lever of the search; ties
/// keep the first cell encountered in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinimumRemaining;

impl CellSelection for MinimumRemaining {
    fn new() -> Self {
        Self
    }

    fn pick(&self, grid: &Grid, candidates: &CandidateGrid) -> Option<(usize, usize)> {
        let mut best = None;
        let mut fewest = usize::MAX;

        for (row, col) in grid.empty_cells() {
            let remaining = candidates.cell(row, col).len();
            if remaining < fewest {
                fewest = remaining;
                best = Some((row, col));
            }
        }
        best
    }
}

/// The first empty cell in row-major order. A baseline for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirstEmpty;

impl CellSelection for FirstEmpty {
    fn new() -> Self {
        Self
    }

    fn pick(&self, grid: &Grid, _: &CandidateGrid) -> Option<(usize, usize)> {
        grid.empty_cells().next()
    }
}
