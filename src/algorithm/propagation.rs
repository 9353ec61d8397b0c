//! Single-hop constraint propagation
//!
//! Every uncollapsed cell is recomputed from scratch out of its direct
//! neighbors' current options. Nothing is pushed transitively: a constraint
//! moves at most one cell per tick, and repeated ticks carry it further.

use crate::algorithm::bitset::TileBitset;
use crate::spatial::grid::Grid;
use crate::spatial::tiles::Direction;
use crate::spatial::tileset::TileSet;

/// What to do when a cell's neighbor constraints have no tile in common
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Forget the conflicting constraints and reopen the full domain
    #[default]
    ResetToFull,
    /// Leave the cell empty so the next selection restarts the grid
    Contradict,
}

/// Counters gathered while building the next grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Cells whose options were recomputed
    pub recomputed: usize,
    /// Cells whose constraints intersected to nothing
    pub conflicts: usize,
}

/// Union of what every option of `neighbor` allows on its `towards` side
///
/// For a cell whose upper neighbor is `neighbor`, pass `Direction::Down`:
/// the result is everything the tiles above still permit below them.
pub fn neighbor_constraint(
    neighbor: &TileBitset,
    tiles: &TileSet,
    towards: Direction,
    out: &mut TileBitset,
) {
    out.clear();
    for option in neighbor.iter() {
        if let Some(allowed) = tiles.neighbors(option, towards) {
            out.union_with(allowed);
        }
    }
}

/// Intersection of the constraints from every in-bounds neighbor of `index`
///
/// Returns `false` when the cell has no in-bounds neighbor, in which case
/// `acc` is left holding the full domain.
pub fn combined_constraint(
    grid: &Grid,
    tiles: &TileSet,
    index: usize,
    acc: &mut TileBitset,
    scratch: &mut TileBitset,
) -> bool {
    acc.fill();
    let mut constrained = false;
    for towards in Direction::ALL {
        let Some(neighbor) = grid.neighbor(index, towards).and_then(|n| grid.get(n)) else {
            continue;
        };
        neighbor_constraint(neighbor.options(), tiles, towards.opposite(), scratch);
        acc.intersect_with(scratch);
        constrained = true;
    }
    constrained
}

/// Build `next` from `current`, carrying collapsed cells and recomputing the rest
///
/// `next` must have the same shape as `current`; it is overwritten cell by
/// cell so neither grid is read and written in the same pass.
pub fn propagate(
    current: &Grid,
    tiles: &TileSet,
    policy: ConflictPolicy,
    next: &mut Grid,
) -> PropagationReport {
    let tile_count = current.tile_count();
    let mut acc = TileBitset::new(tile_count);
    let mut scratch = TileBitset::new(tile_count);
    let mut report = PropagationReport::default();

    for (index, target) in next.cells_mut().iter_mut().enumerate() {
        let Some(cell) = current.get(index) else {
            continue;
        };
        if cell.is_collapsed() {
            target.assign(cell);
            continue;
        }

        combined_constraint(current, tiles, index, &mut acc, &mut scratch);
        report.recomputed += 1;

        if acc.is_empty() {
            report.conflicts += 1;
            if policy == ConflictPolicy::ResetToFull {
                acc.fill();
            }
        }
        target.set_options(&acc);
    }

    report
}
