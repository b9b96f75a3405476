//! Independent validation of completed grids.
//!
//! Deliberately built on plain digit sets rather than the solver's
//! candidate machinery, so it can vouch for solver output on its own.

use crate::solver::grid::{Digit, Grid, BLOCK, SIZE};
use itertools::iproduct;
use rustc_hash::FxHashSet;

/// Whether a completed grid is a legal solution: every row, every column
/// and every block contains each digit `1..=9` exactly once.
///
/// Defined for complete grids only; the result for a grid with empty
/// cells is unspecified.
#[must_use]
pub fn is_valid_solution(grid: &Grid) -> bool {
    (0..SIZE).all(|row| unit_ok(grid.row(row)))
        && (0..SIZE).all(|col| unit_ok(grid.column(col)))
        && iproduct!(0..BLOCK, 0..BLOCK)
            .all(|(block_row, block_col)| unit_ok(grid.block(block_row * BLOCK, block_col * BLOCK)))
}

/// Nine cells hold each of `1..=9` exactly once iff their digit set is
/// exactly `{1..9}`.
fn unit_ok(cells: impl Iterator<Item = Digit>) -> bool {
    let seen: FxHashSet<Digit> = cells.collect();
    seen.len() == SIZE && (1..=9).all(|digit| seen.contains(&digit))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: [[Digit; SIZE]; SIZE] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    #[test]
    fn test_valid_solution_passes() {
        assert!(is_valid_solution(&Grid::from_rows(VALID)));
    }

    #[test]
    fn test_duplicate_in_row_fails() {
        let mut rows = VALID;
        rows[3][4] = rows[3][5];
        assert!(!is_valid_solution(&Grid::from_rows(rows)));
    }

    #[test]
    fn test_swapped_cells_fail_column_check() {
        let mut rows = VALID;
        rows[0].swap(0, 1);
        assert!(!is_valid_solution(&Grid::from_rows(rows)));
    }

    #[test]
    fn test_block_violation_alone_fails() {
        // Each row shifted one further left: rows and columns still hold
        // all nine digits, but blocks repeat.
        let mut rows = [[0; SIZE]; SIZE];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = ((r + c) % SIZE + 1) as Digit;
            }
        }
        assert!(!is_valid_solution(&Grid::from_rows(rows)));
    }

    #[test]
    fn test_incomplete_grid_does_not_pass() {
        let mut rows = VALID;
        rows[8][8] = 0;
        assert!(!is_valid_solution(&Grid::from_rows(rows)));
    }
}
