//! Error types for tile loading, configuration and export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all fallible operations
///
/// Constraint conflicts during stepping are not errors: they are recovered
/// inside the stepper and reported through tick outcomes.
#[derive(Debug)]
pub enum CollapseError {
    /// Failed to load a tile image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// No tile images were supplied
    NoTiles,

    /// A tile image has no pixels
    EmptyTile {
        /// Position of the tile in the input list
        index: usize,
    },

    /// A tile image is not square
    NonSquareTile {
        /// Position of the tile in the input list
        index: usize,
        /// Width in pixels
        width: usize,
        /// Height in pixels
        height: usize,
    },

    /// A tile image differs in size from the first tile
    TileSizeMismatch {
        /// Position of the tile in the input list
        index: usize,
        /// Side length shared by the preceding tiles
        expected: usize,
        /// Side length of this tile
        found: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile index exceeds the analyzed tile list
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tiles available
        max_tiles: usize,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for CollapseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::NoTiles => write!(f, "No tile images were supplied"),
            Self::EmptyTile { index } => write!(f, "Tile {index} has no pixels"),
            Self::NonSquareTile {
                index,
                width,
                height,
            } => {
                write!(f, "Tile {index} is not square ({width}x{height})")
            }
            Self::TileSizeMismatch {
                index,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Tile {index} is {found}x{found} but earlier tiles are {expected}x{expected}"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds ({max_tiles} tiles)")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CollapseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, CollapseError>;

impl From<image::ImageError> for CollapseError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for CollapseError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CollapseError {
    CollapseError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
