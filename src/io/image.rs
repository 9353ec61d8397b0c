//! PNG loading of tile images and rendering of grids, atlases and neighbor sheets

use crate::io::configuration::{ATLAS_COLUMNS, OPEN_CELL_FILL, OPEN_CELL_OUTLINE};
use crate::io::error::{CollapseError, Result};
use crate::spatial::grid::CellView;
use crate::spatial::tiles::{Direction, PixelBuffer};
use crate::spatial::tileset::TileSet;
use image::{Rgba, RgbaImage};
use ndarray::Array2;
use std::path::{Path, PathBuf};

/// Load one PNG as a square tile buffer
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image is empty or not square
pub fn load_tile(path: &Path, index: usize) -> Result<PixelBuffer> {
    let img = image::open(path).map_err(|e| CollapseError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let rgba_img = img.to_rgba8();
    let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);

    let pixels = Array2::from_shape_fn((height, width), |(row, col)| {
        rgba_img
            .get_pixel_checked(col as u32, row as u32)
            .map_or([0, 0, 0, 0], |pixel| pixel.0)
    });

    PixelBuffer::new(pixels, index)
}

/// PNG files in `dir`, ordered by numeric stem when every stem is a number
///
/// # Errors
///
/// Returns an error if the directory cannot be read
pub fn tile_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| CollapseError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("png") {
            paths.push(path);
        }
    }

    let numeric_stem = |path: &PathBuf| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<u64>().ok())
    };

    if paths.iter().all(|p| numeric_stem(p).is_some()) {
        paths.sort_by_key(|p| numeric_stem(p));
    } else {
        paths.sort();
    }
    Ok(paths)
}

/// Load every PNG in `dir` as a tile image
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be read or holds no PNG files
/// - Any image fails to load or is not square
pub fn load_tile_directory(dir: &Path) -> Result<Vec<PixelBuffer>> {
    let paths = tile_paths(dir)?;
    if paths.is_empty() {
        return Err(CollapseError::NoTiles);
    }
    paths
        .iter()
        .enumerate()
        .map(|(index, path)| load_tile(path, index))
        .collect()
}

fn blit(img: &mut RgbaImage, tile: &PixelBuffer, x0: usize, y0: usize) {
    for ((row, col), color) in tile.pixels().indexed_iter() {
        let (x, y) = ((x0 + col) as u32, (y0 + row) as u32);
        if x < img.width() && y < img.height() {
            img.put_pixel(x, y, Rgba(*color));
        }
    }
}

fn draw_open_cell(img: &mut RgbaImage, size: usize, x0: usize, y0: usize) {
    for dy in 0..size {
        for dx in 0..size {
            let border = dx == 0 || dy == 0 || dx + 1 == size || dy + 1 == size;
            let color = if border {
                OPEN_CELL_OUTLINE
            } else {
                OPEN_CELL_FILL
            };
            let (x, y) = ((x0 + dx) as u32, (y0 + dy) as u32);
            if x < img.width() && y < img.height() {
                img.put_pixel(x, y, Rgba(color));
            }
        }
    }
}

/// Render cell views of a `dim x dim` grid at native tile size
///
/// Collapsed cells show their tile; open cells are drawn as dark outlined squares.
///
/// # Errors
///
/// Returns an error if a collapsed cell names a tile outside `tiles`
pub fn render_grid(views: &[CellView], dim: usize, tiles: &TileSet) -> Result<RgbaImage> {
    let size = tiles.tile_size().max(1);
    let side = (dim * size) as u32;
    let mut img = RgbaImage::from_pixel(side, side, Rgba(OPEN_CELL_FILL));

    for (index, view) in views.iter().enumerate() {
        let (x0, y0) = ((index % dim.max(1)) * size, (index / dim.max(1)) * size);
        match *view {
            CellView::Collapsed(tile) => {
                let tile = tiles.get(tile).ok_or(CollapseError::InvalidTileIndex {
                    index: tile,
                    max_tiles: tiles.len(),
                })?;
                blit(&mut img, tile.image(), x0, y0);
            }
            CellView::Uncollapsed(_) => draw_open_cell(&mut img, size, x0, y0),
        }
    }

    Ok(img)
}

/// Render every analyzed tile, `ATLAS_COLUMNS` per row
pub fn render_atlas(tiles: &TileSet) -> RgbaImage {
    let size = tiles.tile_size().max(1);
    let columns = tiles.len().clamp(1, ATLAS_COLUMNS);
    let rows = tiles.len().div_ceil(ATLAS_COLUMNS).max(1);
    let mut img = RgbaImage::from_pixel(
        (columns * size) as u32,
        (rows * size) as u32,
        Rgba(OPEN_CELL_FILL),
    );

    for (index, tile) in tiles.tiles().iter().enumerate() {
        let x0 = (index % ATLAS_COLUMNS) * size;
        let y0 = (index / ATLAS_COLUMNS) * size;
        blit(&mut img, tile.image(), x0, y0);
    }

    img
}

/// Render one tile with its legal neighbors fanned out on each side
///
/// The tile sits at the center of a square canvas; its `up` neighbors stack
/// upwards, `right` neighbors extend rightwards, and so on.
///
/// # Errors
///
/// Returns an error if `index` is not a tile in `tiles`
pub fn render_neighbors(tiles: &TileSet, index: usize) -> Result<RgbaImage> {
    let tile = tiles.get(index).ok_or(CollapseError::InvalidTileIndex {
        index,
        max_tiles: tiles.len(),
    })?;

    let size = tiles.tile_size().max(1);
    let reach = Direction::ALL
        .iter()
        .map(|&d| tile.neighbors(d).count())
        .max()
        .unwrap_or(0);
    let cells = 2 * reach + 1;
    let side = (cells * size) as u32;
    let mut img = RgbaImage::from_pixel(side, side, Rgba(OPEN_CELL_FILL));

    let center = reach;
    blit(&mut img, tile.image(), center * size, center * size);

    for towards in Direction::ALL {
        for (step, neighbor) in tile.neighbors(towards).iter().enumerate() {
            let Some(neighbor_tile) = tiles.get(neighbor) else {
                continue;
            };
            let distance = step + 1;
            let (col, row) = match towards {
                Direction::Up => (center, center - distance),
                Direction::Right => (center + distance, center),
                Direction::Down => (center, center + distance),
                Direction::Left => (center - distance, center),
            };
            blit(&mut img, neighbor_tile.image(), col * size, row * size);
        }
    }

    Ok(img)
}

/// Save a rendered image as PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn save_png(img: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| CollapseError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(output_path)
        .map_err(|e| CollapseError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
