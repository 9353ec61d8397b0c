//! Tile pixel data, edge signatures and rotation
//!
//! A tile is a square RGBA pixel buffer described by the colors along its four
//! borders. Signatures are stored in clockwise traversal order so a quarter
//! turn only permutes which stored edge plays which role.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{CollapseError, Result};
use ndarray::{Array2, Axis};

/// One RGBA pixel
pub type Color = [u8; 4];

/// Side of a tile, also used as the direction towards a neighboring grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row zero; the tile's top edge
    Up,
    /// Towards increasing column; the tile's right edge
    Right,
    /// Towards increasing row; the tile's bottom edge
    Down,
    /// Towards column zero; the tile's left edge
    Left,
}

impl Direction {
    /// All four directions in clockwise order starting from the top
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Position of this direction in [`Direction::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// The direction facing back across the same border
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// The direction this side faces after a quarter turn clockwise
    pub const fn clockwise(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }
}

/// Square RGBA pixel buffer indexed by `(row, col)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Array2<Color>,
}

impl PixelBuffer {
    /// Wrap a pixel array, rejecting empty or non-square buffers
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer has no pixels or its width differs from its height
    pub fn new(pixels: Array2<Color>, index: usize) -> Result<Self> {
        let (height, width) = pixels.dim();
        if width == 0 || height == 0 {
            return Err(CollapseError::EmptyTile { index });
        }
        if width != height {
            return Err(CollapseError::NonSquareTile {
                index,
                width,
                height,
            });
        }
        Ok(Self { pixels })
    }

    /// Build a square buffer by evaluating `f(row, col)` for every pixel
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero
    pub fn from_fn(size: usize, f: impl FnMut((usize, usize)) -> Color) -> Result<Self> {
        Self::new(Array2::from_shape_fn((size, size), f), 0)
    }

    /// Build a buffer of one solid color
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero
    pub fn solid(size: usize, color: Color) -> Result<Self> {
        Self::from_fn(size, |_| color)
    }

    /// Side length in pixels
    pub fn size(&self) -> usize {
        self.pixels.nrows()
    }

    /// Pixel at `(row, col)`, if inside the buffer
    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        self.pixels.get((row, col)).copied()
    }

    /// Borrow the underlying pixel array
    pub const fn pixels(&self) -> &Array2<Color> {
        &self.pixels
    }

    /// Copy of this buffer turned a quarter clockwise
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        // Transpose then mirror the columns
        let mut view = self.pixels.t();
        view.invert_axis(Axis(1));
        Self {
            pixels: view.to_owned(),
        }
    }

    /// One-pixel strip along a border in clockwise traversal order
    ///
    /// Top runs left to right, right runs top to bottom, bottom runs right to
    /// left and left runs bottom to top.
    pub fn edge(&self, side: Direction) -> EdgeSignature {
        let last = self.size() - 1;
        let colors: Vec<Color> = match side {
            Direction::Up => self.pixels.row(0).iter().copied().collect(),
            Direction::Right => self.pixels.column(last).iter().copied().collect(),
            Direction::Down => self.pixels.row(last).iter().rev().copied().collect(),
            Direction::Left => self.pixels.column(0).iter().rev().copied().collect(),
        };
        EdgeSignature(colors)
    }
}

/// Colors sampled along one border of a tile in clockwise order
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeSignature(Vec<Color>);

impl EdgeSignature {
    /// Wrap a color sequence
    pub const fn new(colors: Vec<Color>) -> Self {
        Self(colors)
    }

    /// Sampled colors
    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    /// Number of samples along the edge
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-length edge
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The same border read in the opposite direction
    ///
    /// Two tiles sharing a border traverse it in opposite clockwise
    /// directions, so `a` fits against `b` when `a == b.reversed()`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }
}

/// Deduplication key: the four signatures in top, right, bottom, left order
pub type TileKey = [EdgeSignature; 4];

/// A tile variant with its border signatures and, after analysis, its legal neighbors
#[derive(Clone, Debug)]
pub struct Tile {
    image: PixelBuffer,
    edges: [EdgeSignature; 4],
    rotation: u8,
    neighbors: [TileBitset; 4],
}

impl Tile {
    /// Build the unrotated tile for a pixel buffer
    pub fn new(image: PixelBuffer) -> Self {
        let edges = Direction::ALL.map(|side| image.edge(side));
        Self {
            image,
            edges,
            rotation: 0,
            neighbors: std::array::from_fn(|_| TileBitset::new(0)),
        }
    }

    /// Copy of this tile turned `quarter_turns` times clockwise
    ///
    /// The stored edges are permuted cyclically (the old left edge becomes
    /// the new top) and the pixel buffer is rotated to match.
    #[must_use]
    pub fn rotate(&self, quarter_turns: u8) -> Self {
        let mut image = self.image.clone();
        let mut edges = self.edges.clone();
        for _ in 0..quarter_turns % 4 {
            image = image.rotated_clockwise();
            edges.rotate_right(1);
        }
        Self {
            image,
            edges,
            rotation: (self.rotation + quarter_turns % 4) % 4,
            neighbors: std::array::from_fn(|_| TileBitset::new(0)),
        }
    }

    /// Pixel buffer for rendering
    pub const fn image(&self) -> &PixelBuffer {
        &self.image
    }

    /// Signature of the border on `side`
    pub fn edge(&self, side: Direction) -> &EdgeSignature {
        match side {
            Direction::Up => &self.edges[0],
            Direction::Right => &self.edges[1],
            Direction::Down => &self.edges[2],
            Direction::Left => &self.edges[3],
        }
    }

    /// All four signatures in top, right, bottom, left order
    pub const fn edges(&self) -> &[EdgeSignature; 4] {
        &self.edges
    }

    /// Identity used when discarding redundant rotations
    pub fn key(&self) -> TileKey {
        self.edges.clone()
    }

    /// Quarter turns applied relative to the source image
    pub const fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Tiles allowed to sit next to this one in direction `towards`
    pub fn neighbors(&self, towards: Direction) -> &TileBitset {
        match towards {
            Direction::Up => &self.neighbors[0],
            Direction::Right => &self.neighbors[1],
            Direction::Down => &self.neighbors[2],
            Direction::Left => &self.neighbors[3],
        }
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: [TileBitset; 4]) {
        self.neighbors = neighbors;
    }
}
