//! Tick capture and GIF generation for run visualization

use crate::io::error::{CollapseError, Result};
use crate::io::image::render_grid;
use crate::spatial::grid::CellView;
use crate::spatial::tileset::TileSet;
use image::Frame;
use std::path::Path;

/// A visible change to the grid during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// A cell was collapsed to a tile
    Collapse {
        /// Row-major cell index
        index: usize,
        /// Chosen tile
        tile: usize,
        /// Tick when it happened
        tick: usize,
    },
    /// The whole grid was reopened
    Restart {
        /// Tick when it happened
        tick: usize,
    },
}

/// Records grid events so the run can be replayed as an animation
///
/// Open cells all render alike, so collapses and restarts are the only
/// events needed to reconstruct every frame.
pub struct VisualizationCapture {
    pub(crate) events: Vec<GridEvent>,
    dim: usize,
}

impl VisualizationCapture {
    /// Start capturing for a `dim x dim` grid
    pub fn new(dim: usize, max_ticks: usize) -> Self {
        Self {
            events: Vec::with_capacity(max_ticks.min(dim * dim * 4)),
            dim,
        }
    }

    /// Records a collapsed cell
    pub fn record_collapse(&mut self, index: usize, tile: usize, tick: usize) {
        self.events.push(GridEvent::Collapse { index, tile, tick });
    }

    /// Records a full restart
    pub fn record_restart(&mut self, tick: usize) {
        self.events.push(GridEvent::Restart { tick });
    }

    /// Returns all recorded events
    pub fn events(&self) -> &[GridEvent] {
        &self.events
    }

    /// Returns the total number of recorded events
    pub const fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Export the captured run as a GIF with automatic frame skipping
    ///
    /// Requested delays below what viewers honor are raised to
    /// `VIEWER_MIN_FRAME_DELAY_MS`, dropping frames to keep the apparent speed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No events were captured
    /// - A collapse names a tile missing from `tiles`
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, tiles: &TileSet, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;

        if self.events.is_empty() {
            return Err(CollapseError::InvalidParameter {
                parameter: "visualization",
                value: "empty".to_string(),
                reason: "No grid events captured for visualization".to_string(),
            });
        }

        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms.max(1))
        } else {
            1
        };

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| CollapseError::FileSystem {
                    path: parent.to_path_buf(),
                    operation: "create directory",
                    source: e,
                })?;
            }
        }

        let file = std::fs::File::create(output_path).map_err(|e| CollapseError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        let mut encode = |frame: Frame| {
            encoder
                .encode_frame(frame)
                .map_err(|e| CollapseError::ImageExport {
                    path: output_path.to_path_buf(),
                    source: e,
                })
        };

        // Frames are encoded as soon as they are rendered; only the grid state is kept
        let blank = vec![CellView::Uncollapsed(tiles.len()); self.dim * self.dim];
        let mut views = blank.clone();
        encode(self.render_frame(&views, tiles, effective_delay_ms)?)?;

        let skip_factor = skip_factor as usize;
        let mut event_count = 0;
        for event in &self.events {
            match *event {
                GridEvent::Collapse { index, tile, .. } => {
                    if let Some(view) = views.get_mut(index) {
                        *view = CellView::Collapsed(tile);
                    }
                }
                GridEvent::Restart { .. } => views.clone_from(&blank),
            }

            event_count += 1;
            if event_count % skip_factor == 0 {
                encode(self.render_frame(&views, tiles, effective_delay_ms)?)?;
            }
        }

        if event_count % skip_factor != 0 {
            encode(self.render_frame(&views, tiles, effective_delay_ms)?)?;
        }

        // Final frame displays longer for better visibility
        encode(self.render_frame(&views, tiles, effective_delay_ms * 25)?)?;

        Ok(())
    }

    fn render_frame(&self, views: &[CellView], tiles: &TileSet, delay_ms: u32) -> Result<Frame> {
        let img = render_grid(views, self.dim, tiles)?;
        Ok(Frame::from_parts(
            img,
            0,
            0,
            image::Delay::from_numer_denom_ms(delay_ms, 1),
        ))
    }
}
