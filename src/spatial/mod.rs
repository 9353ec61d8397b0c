//! Spatial data structures
//!
//! This module contains the tile-side types:
//! - Tile pixel buffers, edge signatures and rotation
//! - Tile set construction and adjacency analysis
//! - Grid cells and the square grid

/// Grid cells and the square grid
pub mod grid;
/// Tile pixel buffers, edge signatures and rotation
pub mod tiles;
/// Tile set construction and adjacency analysis
pub mod tileset;

pub use grid::Grid;
pub use tileset::TileSet;
