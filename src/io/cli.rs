//! Command-line interface: load a tile directory, step the grid, export results

use crate::algorithm::propagation::ConflictPolicy;
use crate::algorithm::stepper::{SolverConfig, Stepper, TickOutcome};
use crate::io::configuration::{
    ATLAS_FILE_NAME, DEFAULT_DIM, DEFAULT_MAX_TICKS, GIF_FRAME_DELAY_MS, NEIGHBORS_FILE_PREFIX,
    OUTPUT_FILE_NAME, VISUALIZATION_FILE_NAME,
};
use crate::io::error::Result;
use crate::io::image::{load_tile_directory, render_atlas, render_grid, render_neighbors, save_png};
use crate::io::progress::ProgressManager;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::tileset::TileSet;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "edgetile")]
#[command(
    author,
    version,
    about = "Generate a tiled image from edge-matched square tiles"
)]
/// Command-line arguments for the tile generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory of equal-sized square PNG tiles
    #[arg(value_name = "TILE_DIR")]
    pub tiles: PathBuf,

    /// Grid side length in cells
    #[arg(short, long, default_value_t = DEFAULT_DIM)]
    pub dim: usize,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Maximum ticks before stopping
    #[arg(short, long, default_value_t = DEFAULT_MAX_TICKS)]
    pub ticks: usize,

    /// Restart as soon as neighbor constraints conflict instead of reopening the cell
    #[arg(long)]
    pub strict: bool,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Also write an atlas of every analyzed tile
    #[arg(short, long)]
    pub atlas: bool,

    /// Write the neighbor sheet of this tile index
    #[arg(short, long, value_name = "INDEX")]
    pub inspect: Option<usize>,

    /// Output PNG path (defaults to result.png inside the tile directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Solver parameters selected by the flags
    pub const fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            dim: self.dim,
            seed: self.seed,
            conflict_policy: if self.strict {
                ConflictPolicy::Contradict
            } else {
                ConflictPolicy::ResetToFull
            },
        }
    }

    /// Where the rendered grid is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.tiles.join(OUTPUT_FILE_NAME))
    }

    /// Directory receiving secondary outputs
    pub fn output_dir(&self) -> PathBuf {
        self.output_path()
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }
}

/// Outcome of one CLI run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Ticks that did work
    pub ticks: usize,
    /// Full-grid restarts
    pub restarts: usize,
    /// Whether the grid was fully collapsed
    pub complete: bool,
}

/// Runs the load, step and export pipeline for parsed arguments
pub struct TileRunner {
    cli: Cli,
}

impl TileRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load tiles, step until complete or out of ticks, and write outputs
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile directory cannot be read or holds invalid tiles
    /// - The grid dimension is invalid
    /// - Any output image cannot be written
    pub fn process(&self) -> Result<RunReport> {
        let start_time = Instant::now();

        let images = load_tile_directory(&self.cli.tiles)?;
        let tiles = TileSet::from_images(images)?;
        log::info!(
            "loaded {} tiles from {}",
            tiles.len(),
            self.cli.tiles.display()
        );

        self.export_inspection(&tiles)?;

        let config = self.cli.solver_config();
        let mut stepper = Stepper::new(tiles, &config)?;
        let cell_count = stepper.grid().len();

        let label = self
            .cli
            .tiles
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let progress = if self.cli.should_show_progress() {
            ProgressManager::new(cell_count, &label)
        } else {
            ProgressManager::hidden(cell_count, &label)
        };

        let mut capture = self
            .cli
            .visualize
            .then(|| VisualizationCapture::new(config.dim, self.cli.ticks));

        let summary = stepper.run_with(self.cli.ticks, |stepper, outcome| {
            let stats = stepper.stats();
            if let Some(ref mut viz) = capture {
                match outcome {
                    TickOutcome::Collapsed { index, tile } => {
                        viz.record_collapse(index, tile, stats.ticks);
                    }
                    TickOutcome::Restarted { .. } => viz.record_restart(stats.ticks),
                    TickOutcome::Complete => {}
                }
            }
            progress.update(stepper.grid().collapsed_count(), stats);
        });

        progress.finish(summary.complete, start_time.elapsed());
        if !summary.complete {
            log::warn!(
                "stopped after {} ticks with {} of {cell_count} cells collapsed",
                summary.ticks,
                stepper.grid().collapsed_count()
            );
        }

        let img = render_grid(&stepper.views(), config.dim, stepper.tiles())?;
        save_png(&img, &self.cli.output_path())?;

        if let Some(viz) = capture {
            let viz_path = self.cli.output_dir().join(VISUALIZATION_FILE_NAME);
            viz.export_gif(stepper.tiles(), &viz_path, GIF_FRAME_DELAY_MS)?;
        }

        Ok(RunReport {
            ticks: summary.ticks,
            restarts: summary.restarts,
            complete: summary.complete,
        })
    }

    fn export_inspection(&self, tiles: &TileSet) -> Result<()> {
        let dir = self.cli.output_dir();

        if self.cli.atlas {
            save_png(&render_atlas(tiles), &dir.join(ATLAS_FILE_NAME))?;
        }

        if let Some(index) = self.cli.inspect {
            let sheet = render_neighbors(tiles, index)?;
            save_png(&sheet, &dir.join(format!("{NEIGHBORS_FILE_PREFIX}{index}.png")))?;
        }

        Ok(())
    }
}
