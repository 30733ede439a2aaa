//! Progress display while tiles are drawn onto the canvas

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::mosaic::GridPoint;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many tiles of a run have been drawn
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a progress bar for `tile_count` tiles labelled with `label`
    pub fn new(tile_count: usize, label: &str) -> Self {
        let bar = ProgressBar::new(tile_count as u64);
        bar.set_style(TILE_STYLE.clone());
        bar.set_prefix(label.to_string());
        Self { bar }
    }

    /// Create a manager that draws nothing
    pub fn hidden(tile_count: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(tile_count as u64);
        Self { bar }
    }

    /// Record that the tile at `point` has been drawn
    pub fn tile_drawn(&self, point: GridPoint) {
        self.bar.set_message(point.to_string());
        self.bar.inc(1);
    }

    /// Number of tiles recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Total number of tiles the bar expects
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Finish the bar with a summary of the elapsed time
    pub fn finish(&self, elapsed: Duration) {
        self.bar
            .finish_with_message(format!("done in {:.1}s", elapsed.as_secs_f64()));
    }

    /// Remove the bar after a failed run
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}
