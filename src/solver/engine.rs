//! The backtracking search driver.
//!
//! [`Engine`] implements the solving contract: given a puzzle grid it
//! produces a fully solved grid, or `None` when no assignment satisfies
//! the constraints. The caller's grid is never mutated; the engine works
//! on a private copy.
//!
//! The core loop:
//! 1. Run the constraint propagator to a fixed point.
//! 2. If the grid is complete, return it. If some cell has no candidate
//!    left, fail this branch.
//! 3. Otherwise pick a branch cell (Minimum Remaining Values by default)
//!    and try each of its candidate digits in turn, each on a cloned
//!    private search state. The first success short-circuits upward;
//!    exhaustion means this branch is unsolvable.
//!
//! Sibling branches never share mutable board state, so no undo logic
//! exists anywhere: abandoning a branch simply drops its clone. Recursion
//! depth is bounded by the number of empty cells, and each frame holds one
//! grid and one candidate grid.
//!
//! The engine is generic over a [`SolverConfig`], which plugs in the cell
//! selection strategy, the digit trial order and the trace sink.

use crate::solver::candidate::CandidateGrid;
use crate::solver::grid::Grid;
use crate::solver::order::{Ascending, DigitOrder};
use crate::solver::propagation::{self, Propagation};
use crate::solver::selection::{CellSelection, MinimumRemaining};
use crate::solver::trace::{NoTrace, Trace};
use core::fmt;
use core::marker::PhantomData;

/// Strategy bundle for an [`Engine`].
pub trait SolverConfig {
    /// Picks the branch cell when propagation stalls.
    type CellSelector: CellSelection + fmt::Debug;
    /// Orders a branch cell's trial digits.
    type DigitOrder: DigitOrder + fmt::Debug;
    /// Receives deduction and decision events.
    type Trace: Trace + fmt::Debug + Default;
}

/// The default strategy bundle: MRV selection, ascending digits, no trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type CellSelector = MinimumRemaining;
    type DigitOrder = Ascending;
    type Trace = NoTrace;
}

/// A [`SolverConfig`] assembled from explicit strategy types.
#[derive(Debug, Clone)]
pub struct Config<S, O, T>(PhantomData<(S, O, T)>);

impl<S, O, T> SolverConfig for Config<S, O, T>
where
    S: CellSelection + fmt::Debug,
    O: DigitOrder + fmt::Debug,
    T: Trace + fmt::Debug + Default,
{
    type CellSelector = S;
    type DigitOrder = O;
    type Trace = T;
}

/// Counters accumulated over one `solve` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveStats {
    /// Deduction passes run, across all branches.
    pub passes: usize,
    /// Naked singles committed.
    pub naked_singles: usize,
    /// Hidden singles committed.
    pub hidden_singles: usize,
    /// Branch digits tried by the search driver. Zero means propagation
    /// alone solved the puzzle.
    pub decisions: usize,
}

/// Board state private to one search branch. Cloned on every decision so
/// sibling branches stay isolated.
#[derive(Debug, Clone)]
struct SearchState {
    grid: Grid,
    candidates: CandidateGrid,
}

/// The solving engine.
#[derive(Debug)]
pub struct Engine<C: SolverConfig = DefaultConfig> {
    selector: C::CellSelector,
    order: C::DigitOrder,
    trace: C::Trace,
    stats: SolveStats,
}

impl<C: SolverConfig> Engine<C> {
    /// An engine with the config's default strategy instances.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(C::CellSelector::new(), C::DigitOrder::new(), C::Trace::default())
    }

    /// An engine built from explicit strategy instances.
    pub fn from_parts(selector: C::CellSelector, order: C::DigitOrder, trace: C::Trace) -> Self {
        Self {
            selector,
            order,
            trace,
            stats: SolveStats::default(),
        }
    }

    /// Solves `puzzle`, returning the first solution found or `None` when
    /// no assignment satisfies the constraints.
    ///
    /// `puzzle` itself is left untouched. Givens that already violate the
    /// constraints surface as `None` once search exhausts every branch.
    pub fn solve(&mut self, puzzle: &Grid) -> Option<Grid> {
        self.stats = SolveStats::default();
        let candidates = CandidateGrid::compute(puzzle);
        self.search(SearchState {
            grid: *puzzle,
            candidates,
        })
    }

    /// Counters from the most recent `solve` call.
    #[must_use]
    pub const fn stats(&self) -> SolveStats {
        self.stats
    }

    fn search(&mut self, mut state: SearchState) -> Option<Grid> {
        match propagation::run(
            &mut state.grid,
            &mut state.candidates,
            &mut self.trace,
            &mut self.stats,
        ) {
            Propagation::Solved => return Some(state.grid),
            Propagation::Contradiction => return None,
            Propagation::Stalled => {}
        }

        let (row, col) = self.selector.pick(&state.grid, &state.candidates)?;

        for digit in self.order.arrange(state.candidates.cell(row, col)) {
            self.stats.decisions += 1;
            self.trace.decision(row, col, digit);

            let mut branch = state.clone();
            branch.grid.set(row, col, digit);

            if let Some(solution) = self.search(branch) {
                return Some(solution);
            }
        }

        None
    }
}

impl<C: SolverConfig> Default for Engine<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Solves `puzzle` with the default configuration.
#[must_use]
pub fn solve(puzzle: &Grid) -> Option<Grid> {
    Engine::<DefaultConfig>::new().solve(puzzle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::grid::{Digit, EMPTY, EXAMPLE, EXAMPLE_HARD, SIZE};
    use crate::solver::order::Shuffled;
    use crate::solver::selection::FirstEmpty;
    use crate::solver::validate::is_valid_solution;

    /// The unique solution of [`EXAMPLE`].
    const EXAMPLE_SOLUTION: [[Digit; SIZE]; SIZE] = [
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
    fn test_classic_puzzle_solves_to_known_solution() {
        let solution = solve(&Grid::from_rows(EXAMPLE)).expect("classic puzzle is solvable");
        assert_eq!(solution, Grid::from_rows(EXAMPLE_SOLUTION));
        assert!(is_valid_solution(&solution));
    }

    #[test]
    fn test_hard_puzzle_solution_is_valid() {
        let solution = solve(&Grid::from_rows(EXAMPLE_HARD)).expect("hard puzzle is solvable");
        assert!(is_valid_solution(&solution));
    }

    #[test]
    fn test_empty_grid_has_a_completion() {
        let solution = solve(&Grid::new()).expect("the empty grid has completions");
        assert!(solution.is_complete());
        assert!(is_valid_solution(&solution));
    }

    #[test]
    fn test_duplicate_givens_in_a_row_are_unsolvable() {
        let mut grid = Grid::new();
        grid.set(0, 0, 5);
        grid.set(0, 1, 5);
        assert_eq!(solve(&grid), None);
    }

    #[test]
    fn test_solved_input_is_returned_unchanged() {
        let already_solved = Grid::from_rows(EXAMPLE_SOLUTION);
        let mut engine = Engine::<DefaultConfig>::new();
        assert_eq!(engine.solve(&already_solved), Some(already_solved));
        assert_eq!(engine.stats().decisions, 0);
        assert!(is_valid_solution(&already_solved));
    }

    #[test]
    fn test_caller_grid_is_not_mutated() {
        let puzzle = Grid::from_rows(EXAMPLE);
        let before = puzzle;
        solve(&puzzle).expect("classic puzzle is solvable");
        assert_eq!(puzzle, before);
    }

    #[test]
    fn test_singles_only_puzzle_needs_no_branching() {
        // Blanking one full row of a solved grid leaves each emptied cell
        // a naked single through its column.
        let mut rows = EXAMPLE_SOLUTION;
        rows[0] = [EMPTY; SIZE];
        let mut engine = Engine::<DefaultConfig>::new();
        let solution = engine.solve(&Grid::from_rows(rows)).expect("solvable by deduction");
        assert_eq!(solution, Grid::from_rows(EXAMPLE_SOLUTION));
        assert_eq!(engine.stats().decisions, 0);
        assert!(engine.stats().naked_singles >= SIZE);
    }

    #[test]
    fn test_first_empty_selection_also_solves() {
        let mut engine = Engine::<Config<FirstEmpty, Ascending, NoTrace>>::new();
        let solution = engine
            .solve(&Grid::from_rows(EXAMPLE))
            .expect("classic puzzle is solvable");
        assert_eq!(solution, Grid::from_rows(EXAMPLE_SOLUTION));
    }

    #[test]
    fn test_shuffled_order_finds_a_valid_solution() {
        let mut engine = Engine::<Config<MinimumRemaining, Shuffled, NoTrace>>::from_parts(
            MinimumRemaining,
            Shuffled::with_seed(7),
            NoTrace,
        );
        let solution = engine.solve(&Grid::new()).expect("the empty grid has completions");
        assert!(is_valid_solution(&solution));
    }
}
