//! Grid cells and the square grid they live in
//!
//! Cells are stored row-major: position `(i, j)` with column `i` and row `j`
//! lives at `i + j * dim`.

use crate::algorithm::bitset::TileBitset;
use crate::spatial::tiles::Direction;

/// One grid position: collapsed to a single tile or holding its remaining options
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    collapsed: bool,
    options: TileBitset,
}

impl Cell {
    /// Uncollapsed cell where every tile index is still possible
    pub fn new(tile_count: usize) -> Self {
        Self {
            collapsed: false,
            options: TileBitset::all(tile_count),
        }
    }

    /// Uncollapsed cell with the given options
    pub const fn with_options(options: TileBitset) -> Self {
        Self {
            collapsed: false,
            options,
        }
    }

    /// Whether the cell has been narrowed to its final tile
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Tiles still possible here; a single member once collapsed
    pub const fn options(&self) -> &TileBitset {
        &self.options
    }

    /// Number of remaining options, the cell's entropy
    pub fn entropy(&self) -> usize {
        self.options.count()
    }

    /// The chosen tile of a collapsed cell
    pub fn chosen(&self) -> Option<usize> {
        if self.collapsed {
            self.options.nth(0)
        } else {
            None
        }
    }

    /// Narrow the cell to exactly `tile`
    pub fn collapse(&mut self, tile: usize) {
        self.options = TileBitset::single(tile, self.options.capacity());
        self.collapsed = true;
    }

    /// Overwrite this cell with `other` without reallocating
    pub fn assign(&mut self, other: &Self) {
        self.collapsed = other.collapsed;
        self.options.clone_from(&other.options);
    }

    /// Replace the options of an uncollapsed cell
    pub fn set_options(&mut self, options: &TileBitset) {
        self.collapsed = false;
        self.options.clone_from(options);
    }

    /// Rendering view of this cell
    pub fn view(&self) -> CellView {
        self.chosen()
            .map_or_else(|| CellView::Uncollapsed(self.entropy()), CellView::Collapsed)
    }
}

/// What a renderer needs to know about a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellView {
    /// Resolved to this tile index
    Collapsed(usize),
    /// Still open with this many candidate tiles
    Uncollapsed(usize),
}

/// Square `dim x dim` array of cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dim: usize,
    tile_count: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Fresh grid with every cell holding the full domain
    pub fn new(dim: usize, tile_count: usize) -> Self {
        Self {
            dim,
            tile_count,
            cells: vec![Cell::new(tile_count); dim * dim],
        }
    }

    /// Side length in cells
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Size of the tile domain
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a zero-sized grid
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major index of column `i`, row `j`
    pub const fn index(&self, i: usize, j: usize) -> usize {
        i + j * self.dim
    }

    /// Column and row of a row-major index
    pub const fn coordinates(&self, index: usize) -> (usize, usize) {
        (index % self.dim, index / self.dim)
    }

    /// Cell at column `i`, row `j`
    pub fn cell(&self, i: usize, j: usize) -> Option<&Cell> {
        if i < self.dim && j < self.dim {
            self.cells.get(self.index(i, j))
        } else {
            None
        }
    }

    /// Cell at a row-major index
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Mutable cell at a row-major index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Index of the in-bounds neighbor of `index` towards `towards`
    pub const fn neighbor(&self, index: usize, towards: Direction) -> Option<usize> {
        let (i, j) = self.coordinates(index);
        match towards {
            Direction::Up if j > 0 => Some(index - self.dim),
            Direction::Right if i + 1 < self.dim => Some(index + 1),
            Direction::Down if j + 1 < self.dim => Some(index + self.dim),
            Direction::Left if i > 0 => Some(index - 1),
            _ => None,
        }
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// True when every cell is collapsed
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Rendering view of every cell in row-major order
    pub fn views(&self) -> Vec<CellView> {
        self.cells.iter().map(Cell::view).collect()
    }

    /// Return every cell to the full domain
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::new(self.tile_count);
        }
    }
}
