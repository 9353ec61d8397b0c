//! Edge-matched tile generation in the wave function collapse family
//!
//! Square tiles are described by the colors along their borders. Rotations
//! are expanded and deduplicated, adjacency is derived from matching edges,
//! and a grid is narrowed one lowest-entropy cell per tick until every cell
//! holds a single tile or a contradiction forces a restart.

#![forbid(unsafe_code)]

/// Grid stepping: selection, propagation and the tick driver
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Tiles, tile sets and the cell grid
pub mod spatial;

pub use algorithm::stepper::{SolverConfig, SolverState, Stepper, TickOutcome};
pub use io::error::{CollapseError, Result};
