//! Trial order for a branch cell's candidate digits.
//!
//! Analogous to phase selection in a SAT solver: which value gets tried
//! first. [`Ascending`] is the default; [`Shuffled`] randomises the order
//! for experimentation.

use crate::solver::candidate::DigitSet;
use crate::solver::grid::Digit;
use smallvec::SmallVec;

/// Arranges a candidate set into the order the search driver tries it.
pub trait DigitOrder {
    /// A fresh ordering strategy.
    fn new() -> Self;

    /// The digits of `set` in trial order.
    fn arrange(&mut self, set: DigitSet) -> SmallVec<[Digit; 9]>;
}

/// Ascending digit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ascending;

impl DigitOrder for Ascending {
    fn new() -> Self {
        Self
    }

    fn arrange(&mut self, set: DigitSet) -> SmallVec<[Digit; 9]> {
        set.iter().collect()
    }
}

/// Uniformly shuffled order.
#[derive(Debug, Clone)]
pub struct Shuffled(fastrand::Rng);

impl Shuffled {
    /// A shuffled order with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl DigitOrder for Shuffled {
    fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    fn arrange(&mut self, set: DigitSet) -> SmallVec<[Digit; 9]> {
        let mut digits: SmallVec<[Digit; 9]> = set.iter().collect();
        self.0.shuffle(&mut digits);
        digits
    }
}
