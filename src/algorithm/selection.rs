//! Minimum-entropy cell selection and uniform random choice

use crate::spatial::grid::Grid;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Random source for every stochastic choice in a run
///
/// Seeded once; restarts keep drawing from the same stream.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a selector seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when `seed` is given, otherwise from entropy
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Uniformly pick an index below `len`, or `None` when `len` is zero
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Uniformly pick an element of a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.choose_index(items.len())
            .and_then(|index| items.get(index))
    }
}

/// Uncollapsed cells sharing the smallest option count
///
/// Returns the count and the row-major indices holding it. Cells with zero
/// options take part like any other and will win the minimum.
pub fn minimum_entropy_candidates(grid: &Grid) -> Option<(usize, Vec<usize>)> {
    let mut min_count = usize::MAX;
    let mut candidates = Vec::new();

    for (index, cell) in grid.cells().iter().enumerate() {
        if cell.is_collapsed() {
            continue;
        }
        let count = cell.entropy();
        if count < min_count {
            min_count = count;
            candidates.clear();
        }
        if count == min_count {
            candidates.push(index);
        }
    }

    (!candidates.is_empty()).then_some((min_count, candidates))
}
