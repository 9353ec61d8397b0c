//! Runtime defaults and rendering constants

/// Grid side length used when none is given
pub const DEFAULT_DIM: usize = 31;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid side length
pub const MAX_GRID_DIMENSION: usize = 1_000;

/// Default maximum ticks before stopping
pub const DEFAULT_MAX_TICKS: usize = 100_000;

// Output settings
/// File name of the rendered grid, written next to the tile directory
pub const OUTPUT_FILE_NAME: &str = "result.png";
/// File name of the tick-by-tick animation
pub const VISUALIZATION_FILE_NAME: &str = "result_visualization.gif";
/// File name of the tile atlas
pub const ATLAS_FILE_NAME: &str = "atlas.png";
/// File name prefix of neighbor sheets, followed by the tile index
pub const NEIGHBORS_FILE_PREFIX: &str = "neighbors_";

/// Tiles per row in the atlas
pub const ATLAS_COLUMNS: usize = 25;

/// Fill of cells that are still open
pub const OPEN_CELL_FILL: [u8; 4] = [0, 0, 0, 255];
/// Outline drawn around cells that are still open
pub const OPEN_CELL_OUTLINE: [u8; 4] = [51, 51, 51, 255];

/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
