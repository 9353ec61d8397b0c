//! Terminal progress display for a stepping run

use crate::algorithm::stepper::StepStats;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {prefix} [{bar:30.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows collapsed cells out of the grid total, plus tick and restart counters
///
/// The bar length is the cell count; its position follows the number of
/// collapsed cells and falls back to zero on every restart.
pub struct ProgressManager {
    bar: ProgressBar,
    cell_count: usize,
}

impl ProgressManager {
    /// Create a visible progress bar for a grid of `cell_count` cells
    pub fn new(cell_count: usize, label: &str) -> Self {
        Self::with_target(cell_count, label, ProgressDrawTarget::stderr())
    }

    /// Create a progress bar that never draws
    pub fn hidden(cell_count: usize, label: &str) -> Self {
        Self::with_target(cell_count, label, ProgressDrawTarget::hidden())
    }

    fn with_target(cell_count: usize, label: &str, target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(cell_count as u64), target);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(label.to_string());
        Self { bar, cell_count }
    }

    /// Report collapsed cells and run counters
    pub fn update(&self, collapsed: usize, stats: StepStats) {
        self.bar.set_position(collapsed as u64);
        let width = self.cell_count.to_string().len();
        self.bar.set_message(format!(
            "{collapsed:>width$}/{} cells, tick {}, restarts {}",
            self.cell_count, stats.ticks, stats.restarts
        ));
    }

    /// Current bar position
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar, leaving a summary line
    pub fn finish(&self, complete: bool, elapsed: Duration) {
        let status = if complete { "complete" } else { "stopped" };
        self.bar.finish_with_message(format!(
            "{status} in {:.2}s ({})",
            elapsed.as_secs_f64(),
            self.bar.message()
        ));
    }
}
