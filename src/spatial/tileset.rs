//! Tile set construction: rotation expansion, deduplication and adjacency analysis
//!
//! Runs once before stepping. Each base image contributes its distinct
//! quarter turns; the concatenated list fixes the tile indices used by the
//! grid, and every tile then records which tiles may touch each of its sides.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{CollapseError, Result};
use crate::spatial::tiles::{Direction, EdgeSignature, PixelBuffer, Tile, TileKey};
use std::collections::HashSet;

/// Analyzed, index-stable list of tiles
#[derive(Clone, Debug, Default)]
pub struct TileSet {
    tiles: Vec<Tile>,
    tile_size: usize,
}

impl TileSet {
    /// Build the analyzed tile list from base images
    ///
    /// An empty input yields an empty set; the stepper refuses to run on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the images are not all the same size
    pub fn from_images(images: Vec<PixelBuffer>) -> Result<Self> {
        let tile_size = Self::common_size(&images)?;

        let mut tiles = Vec::new();
        for image in images {
            let base = Tile::new(image);
            tiles.extend(Self::distinct_rotations(&base));
        }

        Self::analyze(&mut tiles);

        log::debug!(
            "analyzed {} tiles of {tile_size}x{tile_size} pixels",
            tiles.len()
        );

        Ok(Self { tiles, tile_size })
    }

    fn common_size(images: &[PixelBuffer]) -> Result<usize> {
        let Some(first) = images.first() else {
            return Ok(0);
        };
        let expected = first.size();
        for (index, image) in images.iter().enumerate() {
            if image.size() != expected {
                return Err(CollapseError::TileSizeMismatch {
                    index,
                    expected,
                    found: image.size(),
                });
            }
        }
        Ok(expected)
    }

    /// The four quarter turns of `base`, keeping the first tile for each signature key
    ///
    /// Deduplication is scoped to one base tile: identical tiles coming from
    /// different base images are kept apart.
    pub fn distinct_rotations(base: &Tile) -> Vec<Tile> {
        let mut seen: HashSet<TileKey> = HashSet::new();
        let mut unique = Vec::with_capacity(4);
        for quarter_turns in 0..4 {
            let rotated = base.rotate(quarter_turns);
            if seen.insert(rotated.key()) {
                unique.push(rotated);
            }
        }
        unique
    }

    /// Fill in every tile's per-direction neighbor sets
    ///
    /// `u` is a legal neighbor of `t` towards `d` when `t`'s edge facing `d`
    /// fits `u`'s edge facing back. Adjacent borders run in opposite
    /// clockwise directions, so each tile's reversed edges are computed once
    /// and the all-pairs pass compares by plain equality.
    fn analyze(tiles: &mut [Tile]) {
        let count = tiles.len();
        let mating: Vec<[EdgeSignature; 4]> = tiles
            .iter()
            .map(|tile| tile.edges().clone().map(|edge| edge.reversed()))
            .collect();

        let mut all_neighbors = Vec::with_capacity(count);
        for tile in tiles.iter() {
            let neighbors = Direction::ALL.map(|towards| {
                let facing = tile.edge(towards);
                let back = towards.opposite().index();
                let mut allowed = TileBitset::new(count);
                for (candidate, edges) in mating.iter().enumerate() {
                    if edges.get(back) == Some(facing) {
                        allowed.insert(candidate);
                    }
                }
                allowed
            });
            all_neighbors.push(neighbors);
        }

        for (tile, neighbors) in tiles.iter_mut().zip(all_neighbors) {
            tile.set_neighbors(neighbors);
        }
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True when no tiles were supplied
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Side length shared by every tile image, zero for an empty set
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Tile at `index`
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// All tiles in index order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tiles allowed next to `tile` towards `towards`, if `tile` exists
    pub fn neighbors(&self, tile: usize, towards: Direction) -> Option<&TileBitset> {
        self.tiles.get(tile).map(|t| t.neighbors(towards))
    }
}
