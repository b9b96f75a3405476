//! The constraint propagator.
//!
//! Drives a grid toward a solution using only logically forced moves. The
//! fixed-point loop re-derives every empty cell's candidates, then applies
//! two deduction rules in a combined pass:
//!
//! 1. **Naked single**: an empty cell whose candidate set is a singleton
//!    gets that digit committed.
//! 2. **Hidden single**: a digit with exactly one possible cell within a
//!    row, column or block is committed there, even if that cell still has
//!    other candidates.
//!
//! Passes repeat while at least one commit occurred; the first pass with
//! zero commits is the fixed point. Within a pass, naked singles are
//! resolved cell by cell in row-major order, then hidden singles over
//! blocks, columns and rows; each deduction is committed immediately, so
//! deductions may cascade within the same pass.
//!
//! After the fixed point the grid is classified: [`Propagation::Solved`]
//! when no empty cell remains, [`Propagation::Contradiction`] when some
//! empty cell has no candidates left, and [`Propagation::Stalled`] when
//! logic alone is exhausted and the search driver has to guess.

use crate::solver::candidate::CandidateGrid;
use crate::solver::engine::SolveStats;
use crate::solver::grid::{self, Digit, Grid};
use crate::solver::trace::{Trace, Unit};
use itertools::iproduct;

/// Outcome of running the propagator to its fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// No empty cells remain.
    Solved,
    /// Some empty cell has an empty candidate set.
    Contradiction,
    /// The grid is as simplified as logic alone allows.
    Stalled,
}

/// Runs deduction passes on `grid` until a fixed point, then classifies
/// the result. `candidates` is left in the state of the final pass.
pub fn run<T: Trace>(
    grid: &mut Grid,
    candidates: &mut CandidateGrid,
    trace: &mut T,
    stats: &mut SolveStats,
) -> Propagation {
    loop {
        *candidates = CandidateGrid::compute(grid);
        stats.passes += 1;
        if !deduction_pass(grid, candidates, trace, stats) {
            break;
        }
    }

    if grid.is_complete() {
        Propagation::Solved
    } else if grid
        .empty_cells()
        .any(|(row, col)| candidates.cell(row, col).is_empty())
    {
        Propagation::Contradiction
    } else {
        Propagation::Stalled
    }
}

/// One combined deduction pass. Returns whether anything was committed.
fn deduction_pass<T: Trace>(
    grid: &mut Grid,
    candidates: &mut CandidateGrid,
    trace: &mut T,
    stats: &mut SolveStats,
) -> bool {
    let mut changed = false;

    for (row, col) in iproduct!(0..grid::SIZE, 0..grid::SIZE) {
        if !grid.is_empty_cell(row, col) {
            continue;
        }
        if let Some(digit) = candidates.cell(row, col).single() {
            commit(grid, candidates, row, col, digit);
            trace.naked_single(row, col, digit);
            stats.naked_singles += 1;
            changed = true;
        }
    }

    for (block_row, block_col) in iproduct!(0..grid::BLOCK, 0..grid::BLOCK) {
        let cells = grid::block_cells(block_row * grid::BLOCK, block_col * grid::BLOCK);
        changed |= hidden_singles(grid, candidates, cells, Unit::Block, trace, stats);
    }
    for col in 0..grid::SIZE {
        let cells = (0..grid::SIZE).map(move |row| (row, col));
        changed |= hidden_singles(grid, candidates, cells, Unit::Column, trace, stats);
    }
    for row in 0..grid::SIZE {
        let cells = (0..grid::SIZE).map(move |col| (row, col));
        changed |= hidden_singles(grid, candidates, cells, Unit::Row, trace, stats);
    }

    changed
}

/// Commits every hidden single in one unit. Returns whether anything was
/// committed.
fn hidden_singles<T: Trace>(
    grid: &mut Grid,
    candidates: &mut CandidateGrid,
    cells: impl Iterator<Item = (usize, usize)> + Clone,
    unit: Unit,
    trace: &mut T,
    stats: &mut SolveStats,
) -> bool {
    let mut changed = false;

    for digit in 1..=9 {
        let mut found = None;
        let mut count = 0;
        for (row, col) in cells.clone() {
            if grid.is_empty_cell(row, col) && candidates.cell(row, col).contains(digit) {
                count += 1;
                if count > 1 {
                    break;
                }
                found = Some((row, col));
            }
        }
        // A count of one is a genuine unique occurrence, so the first
        // match is the only match.
        if count == 1 {
            if let Some((row, col)) = found {
                commit(grid, candidates, row, col, digit);
                trace.hidden_single(unit, row, col, digit);
                stats.hidden_singles += 1;
                changed = true;
            }
        }
    }

    changed
}

/// Writes a forced digit into the grid. The cell's own candidates are
/// cleared and the digit is stripped from its peers, so later scans in the
/// same pass see consistent sets; every pass still re-derives from scratch.
fn commit(grid: &mut Grid, candidates: &mut CandidateGrid, row: usize, col: usize, digit: Digit) {
    grid.set(row, col, digit);
    candidates.clear(row, col);
    candidates.eliminate_peers(row, col, digit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::grid::{EMPTY, EXAMPLE_HARD};
    use crate::solver::trace::NoTrace;

    fn propagate(grid: &mut Grid) -> (Propagation, SolveStats) {
        let mut candidates = CandidateGrid::compute(grid);
        let mut stats = SolveStats::default();
        let outcome = run(grid, &mut candidates, &mut NoTrace, &mut stats);
        (outcome, stats)
    }

    #[test]
    fn test_naked_single_is_committed() {
        let mut rows = [[EMPTY; 9]; 9];
        rows[0] = [0, 2, 3, 4, 5, 6, 7, 8, 9];
        let mut grid = Grid::from_rows(rows);
        let (_, stats) = propagate(&mut grid);
        assert_eq!(grid.get(0, 0), 1);
        assert!(stats.naked_singles >= 1);
    }

    #[test]
    fn test_hidden_single_in_block_is_committed() {
        // 5 is excluded from every cell of the top-left block except
        // (0, 0), which still has many other candidates.
        let mut grid = Grid::new();
        grid.set(1, 5, 5);
        grid.set(2, 8, 5);
        grid.set(5, 1, 5);
        grid.set(8, 2, 5);
        let (_, stats) = propagate(&mut grid);
        assert_eq!(grid.get(0, 0), 5);
        assert!(stats.hidden_singles >= 1);
    }

    #[test]
    fn test_contradiction_is_detected() {
        // (0, 0) sees 2..=9 in its row and 1 in its column: no candidate.
        let mut rows = [[EMPTY; 9]; 9];
        rows[0] = [0, 2, 3, 4, 5, 6, 7, 8, 9];
        rows[1][0] = 1;
        let mut grid = Grid::from_rows(rows);
        let (outcome, _) = propagate(&mut grid);
        assert_eq!(outcome, Propagation::Contradiction);
    }

    #[test]
    fn test_hard_puzzle_stalls() {
        let mut grid = Grid::from_rows(EXAMPLE_HARD);
        let (outcome, _) = propagate(&mut grid);
        assert_eq!(outcome, Propagation::Stalled);
        assert!(!grid.is_complete());
    }

    #[test]
    fn test_fixed_point_is_idempotent() {
        let mut grid = Grid::from_rows(crate::solver::grid::EXAMPLE);
        propagate(&mut grid);
        let after_first = grid;

        let (_, stats) = propagate(&mut grid);
        assert_eq!(grid, after_first);
        assert_eq!(stats.naked_singles, 0);
        assert_eq!(stats.hidden_singles, 0);
        assert_eq!(stats.passes, 1);
    }

    #[test]
    fn test_complete_grid_is_solved() {
        let mut grid = Grid::from_rows([
            [5, 3, 4, 6, 7, 8, 9, 1, 2],
            [6, 7, 2, 1, 9, 5, 3, 4, 8],
            [1, 9, 8, 3, 4, 2, 5, 6, 7],
            [8, 5, 9, 7, 6, 1, 4, 2, 3],
            [4, 2, 6, 8, 5, 3, 7, 9, 1],
            [7, 1, 3, 9, 2, 4, 8, 5, 6],
            [9, 6, 1, 5, 3, 7, 2, 8, 4],
            [2, 8, 7, 4, 1, 9, 6, 3, 5],
            [3, 4, 5, 2, 8, 6, 1, 7, 9],
        ]);
        let (outcome, stats) = propagate(&mut grid);
        assert_eq!(outcome, Propagation::Solved);
        assert_eq!(stats.naked_singles, 0);
        assert_eq!(stats.hidden_singles, 0);
    }
}
