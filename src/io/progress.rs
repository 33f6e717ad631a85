//! Progress display for collapse runs

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates the per-file collapse progress bar
///
/// The bar tracks decided cells over total cells, the one observable
/// quantity that grows monotonically over a run.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bar: None,
        }
    }

    /// Begin tracking a file's collapse run
    pub fn start_file(&mut self, path: &Path, total_cells: usize) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let bar = ProgressBar::new(total_cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(display_name);
        self.bar = Some(self.multi_progress.add(bar));
        self.update(0, total_cells);
    }

    /// Report the current decided-cell count
    pub fn update(&self, decided_cells: usize, total_cells: usize) {
        if let Some(ref bar) = self.bar {
            bar.set_position(decided_cells as u64);
            let max_width = total_cells.to_string().len();
            bar.set_message(format!("{decided_cells:>max_width$}/{total_cells}"));
        }
    }

    /// Mark the current file as completed
    pub fn complete_file(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}
