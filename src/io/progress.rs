//! Row-level progress tracking across a batch of files

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Display state for one file in the rolling window
#[derive(Debug, Clone, Default)]
struct FileState {
    name: String,
    rows_done: usize,
    total_rows: usize,
    elapsed: Duration,
}

/// Coordinates progress display for batch synthesis
///
/// Shows one bar per file for small batches and adds a batch bar once more
/// files are queued than can be shown individually.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_states: Vec<FileState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static ROW_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Create bars for a batch of `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(0);
            pb.set_style(ROW_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Start tracking a file with `total_rows` rows to synthesize
    pub fn start_file(&mut self, index: usize, path: &Path, total_rows: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, FileState::default());
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = FileState {
                name,
                rows_done: 0,
                total_rows,
                elapsed: Duration::ZERO,
            };
        }
        self.update_bars();
    }

    /// Report rows completed so far and elapsed time
    pub fn update_rows(&mut self, index: usize, rows_done: usize, elapsed: Duration) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.rows_done = rows_done.min(state.total_rows);
            state.elapsed = elapsed;
        }
        self.update_bars();
    }

    /// Mark a file as completed
    pub fn complete_file(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.name = format!("✓ {}", state.name);
            state.rows_done = state.total_rows;
            state.elapsed = elapsed;
        }
        self.update_bars();
    }

    /// Rows completed for a tracked file
    pub fn rows_done(&self, index: usize) -> Option<usize> {
        self.file_states.get(index).map(|state| state.rows_done)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Show the most recent files in the available bars
    fn update_bars(&self) {
        let active: Vec<&FileState> = self
            .file_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar, state) in self.file_bars.iter().zip(visible) {
            bar.set_length(state.total_rows as u64);
            bar.set_position(state.rows_done as u64);
            let width = state.total_rows.to_string().len();
            bar.set_message(format!(
                "{:>width$}/{} rows {:>5.1}s",
                state.rows_done,
                state.total_rows,
                state.elapsed.as_secs_f64()
            ));
            bar.set_prefix(state.name.clone());
        }

        for bar in self.file_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
