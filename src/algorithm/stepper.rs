use crate::{
    algorithm::propagation::{ConflictPolicy, PropagationReport, propagate},
    algorithm::selection::{RandomSelector, minimum_entropy_candidates},
    io::configuration::{DEFAULT_DIM, MAX_GRID_DIMENSION},
    io::error::{CollapseError, Result, invalid_parameter},
    spatial::grid::{CellView, Grid},
    spatial::tileset::TileSet,
};

/// Solver parameters supplied by the caller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Grid side length in cells
    pub dim: usize,
    /// Seed for reproducible runs; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Handling of cells whose neighbor constraints intersect to nothing
    pub conflict_policy: ConflictPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            dim: DEFAULT_DIM,
            seed: None,
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

impl SolverConfig {
    /// Check the grid dimension
    ///
    /// # Errors
    ///
    /// Returns an error if `dim` is zero or exceeds `MAX_GRID_DIMENSION`
    pub fn validate(&self) -> Result<()> {
        if self.dim == 0 {
            return Err(invalid_parameter("dim", &self.dim, &"must be at least 1"));
        }
        if self.dim > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "dim",
                &self.dim,
                &format!("must not exceed {MAX_GRID_DIMENSION}"),
            ));
        }
        Ok(())
    }
}

/// Everything a run owns between ticks
#[derive(Clone, Debug)]
pub struct SolverState {
    /// Current grid
    pub grid: Grid,
    /// Analyzed tiles, read-only while stepping
    pub tiles: TileSet,
}

impl SolverState {
    /// Pair a tile set with a fresh `dim x dim` grid
    pub fn new(tiles: TileSet, dim: usize) -> Self {
        Self {
            grid: Grid::new(dim, tiles.len()),
            tiles,
        }
    }
}

/// Result of one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Every cell was already collapsed; nothing changed
    Complete,
    /// A cell was collapsed and the rest of the grid recomputed
    Collapsed {
        /// Row-major index of the collapsed cell
        index: usize,
        /// Tile chosen for it
        tile: usize,
    },
    /// The selected cell had no options; the grid was rebuilt from scratch
    Restarted {
        /// Row-major index of the empty cell
        index: usize,
    },
}

/// Cumulative counters over the life of a stepper
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Ticks that collapsed a cell or restarted the grid
    pub ticks: usize,
    /// Cells collapsed, including work later discarded by restarts
    pub collapses: usize,
    /// Full-grid restarts
    pub restarts: usize,
    /// Cells whose neighbor constraints had no tile in common
    pub conflicts: usize,
}

/// Outcome of [`Stepper::run`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks that did work during this run
    pub ticks: usize,
    /// Restarts during this run
    pub restarts: usize,
    /// Whether the grid ended fully collapsed
    pub complete: bool,
}

/// Drives the grid from all-open to fully collapsed, one tick at a time
///
/// Each tick collapses the lowest-entropy cell and rebuilds every other open
/// cell from its direct neighbors into a back buffer, which is then swapped
/// in. The caller decides when to tick; stopping is simply not ticking.
pub struct Stepper {
    state: SolverState,
    back: Grid,
    selector: RandomSelector,
    policy: ConflictPolicy,
    stats: StepStats,
}

impl Stepper {
    /// Create a stepper over a fresh grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile set is empty, so no cell could ever be collapsed
    /// - The configured dimension is invalid
    pub fn new(tiles: TileSet, config: &SolverConfig) -> Result<Self> {
        config.validate()?;
        if tiles.is_empty() {
            return Err(CollapseError::NoTiles);
        }

        let state = SolverState::new(tiles, config.dim);
        let back = state.grid.clone();

        Ok(Self {
            state,
            back,
            selector: RandomSelector::from_seed(config.seed),
            policy: config.conflict_policy,
            stats: StepStats::default(),
        })
    }

    /// Current grid
    pub const fn grid(&self) -> &Grid {
        &self.state.grid
    }

    /// Analyzed tiles
    pub const fn tiles(&self) -> &TileSet {
        &self.state.tiles
    }

    /// Give up the stepper, keeping its state
    pub fn into_state(self) -> SolverState {
        self.state
    }

    /// Counters accumulated so far
    pub const fn stats(&self) -> StepStats {
        self.stats
    }

    /// True once every cell is collapsed
    pub fn is_complete(&self) -> bool {
        self.state.grid.is_complete()
    }

    /// Rendering view of the current grid
    pub fn views(&self) -> Vec<CellView> {
        self.state.grid.views()
    }

    /// Discard all progress and reopen every cell
    pub fn restart(&mut self) {
        self.state.grid.reset();
    }

    /// Advance by one tick
    pub fn tick(&mut self) -> TickOutcome {
        let Some((_, candidates)) = minimum_entropy_candidates(&self.state.grid) else {
            return TickOutcome::Complete;
        };

        self.stats.ticks += 1;

        let Some(&index) = self.selector.choose(&candidates) else {
            return TickOutcome::Complete;
        };

        let pick = self.state.grid.get(index).and_then(|cell| {
            self.selector
                .choose_index(cell.entropy())
                .and_then(|n| cell.options().nth(n))
        });

        let Some(tile) = pick else {
            self.stats.restarts += 1;
            log::warn!(
                "cell {index} has no options at tick {}, restarting (restart {})",
                self.stats.ticks,
                self.stats.restarts
            );
            self.restart();
            return TickOutcome::Restarted { index };
        };

        if let Some(cell) = self.state.grid.get_mut(index) {
            cell.collapse(tile);
        }
        self.stats.collapses += 1;

        let report: PropagationReport = propagate(
            &self.state.grid,
            &self.state.tiles,
            self.policy,
            &mut self.back,
        );
        self.stats.conflicts += report.conflicts;
        std::mem::swap(&mut self.state.grid, &mut self.back);

        if self.state.grid.is_complete() {
            log::info!(
                "grid complete after {} ticks and {} restarts",
                self.stats.ticks,
                self.stats.restarts
            );
        }

        TickOutcome::Collapsed { index, tile }
    }

    /// Tick until the grid is complete or `max_ticks` ticks have done work
    pub fn run(&mut self, max_ticks: usize) -> RunSummary {
        self.run_with(max_ticks, |_, _| {})
    }

    /// Like [`Stepper::run`], calling `observer` after every tick that did work
    pub fn run_with(
        &mut self,
        max_ticks: usize,
        mut observer: impl FnMut(&Self, TickOutcome),
    ) -> RunSummary {
        let start = self.stats;
        for _ in 0..max_ticks {
            let outcome = self.tick();
            if outcome == TickOutcome::Complete {
                break;
            }
            observer(self, outcome);
        }

        RunSummary {
            ticks: self.stats.ticks - start.ticks,
            restarts: self.stats.restarts - start.restarts,
            complete: self.is_complete(),
        }
    }
}
