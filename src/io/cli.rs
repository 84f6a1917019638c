//! Command-line interface for batch texture synthesis of PNG files

use crate::algorithm::executor::{SynthesisConfig, SynthesisEngine, SynthesisState};
use crate::algorithm::matching::MatchStrategy;
use crate::io::configuration::{
    DEFAULT_NEIGHBOR_COUNT, DEFAULT_SEED, GIF_FRAME_DELAY_MS, MAX_TARGET_DIMENSION, OUTPUT_SUFFIX,
    TILE_PREVIEW_REPEAT, TILED_SUFFIX, VISUALIZATION_SUFFIX,
};
use crate::io::error::{AlgorithmError, Result, file_system_error, invalid_parameter, path_error};
use crate::io::image::{export_grid_as_png, load_pixel_grid, tile_grid};
use crate::io::progress::ProgressManager;
use crate::io::visualization::VisualizationCapture;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::Level;

#[derive(Parser)]
#[command(name = "retexture")]
#[command(
    author,
    version,
    about = "Synthesize a new texture from a source image by greedy neighborhood matching"
)]
/// Command-line arguments for the synthesis tool
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for the initial noise
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Causal neighborhood radius in pixels
    #[arg(short = 'r', long = "radius", default_value_t = DEFAULT_NEIGHBOR_COUNT)]
    pub neighbor_count: usize,

    /// Output width in pixels (implies square if height not specified)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Output height in pixels
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Search source candidates on all cores
    #[arg(short, long)]
    pub parallel: bool,

    /// Also write a 2x2 tiled preview of the output
    #[arg(short, long)]
    pub tile: bool,

    /// Also write an animated GIF of the row-by-row synthesis
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log every generated row
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Maximum log level implied by `--quiet` and `--verbose`
    pub const fn log_level(&self) -> Level {
        if self.quiet {
            Level::WARN
        } else if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Candidate search strategy selected by `--parallel`
    pub const fn strategy(&self) -> MatchStrategy {
        if self.parallel {
            MatchStrategy::Parallel
        } else {
            MatchStrategy::Exhaustive
        }
    }

    /// Output size for a source of the given size
    ///
    /// A single given dimension implies a square output; none keeps the source size.
    ///
    /// # Errors
    ///
    /// Returns an error if a requested dimension exceeds `MAX_TARGET_DIMENSION`
    pub fn target_size(&self, source_width: usize, source_height: usize) -> Result<(usize, usize)> {
        let (width, height) = match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, w),
            (None, Some(h)) => (h, h),
            (None, None) => (source_width, source_height),
        };

        for (parameter, value) in [("width", width), ("height", height)] {
            if value > MAX_TARGET_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_TARGET_DIMENSION}"),
                ));
            }
        }

        Ok((width, height))
    }
}

/// Install the stderr log subscriber for the binary
pub fn init_tracing(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_png(target) {
                return Err(path_error("Target file must be a PNG image"));
            }
            Ok(self
                .should_process_file(target)
                .then(|| target.clone())
                .into_iter()
                .collect())
        } else if target.is_dir() {
            let mut files = Vec::new();
            let entries =
                std::fs::read_dir(target).map_err(file_system_error(target, "read directory"))?;
            for entry in entries {
                let path = entry.map_err(file_system_error(target, "read directory"))?.path();
                if is_png(&path) && !is_derived_output(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(path_error("Target must be a PNG file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        if output_path(input_path).exists() {
            tracing::warn!(path = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();

        let source = load_pixel_grid(input_path)?;
        let (target_width, target_height) = self.cli.target_size(source.width(), source.height())?;
        let config = SynthesisConfig::new(self.cli.neighbor_count, target_width, target_height)
            .with_strategy(self.cli.strategy());

        let mut state = SynthesisEngine::new(source, config)?.seed(self.cli.seed)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, target_height);
        }

        let mut capture = self
            .cli
            .visualize
            .then(|| VisualizationCapture::new(target_height));
        if let Some(ref mut capture) = capture {
            capture.record_seed(state.output())?;
        }

        while state.synthesize_row()? {
            self.record_row(index, start_time, &state, capture.as_mut())?;
        }
        self.record_row(index, start_time, &state, capture.as_mut())?;

        let output = state
            .into_output()
            .ok_or_else(|| AlgorithmError::InvalidSourceData {
                reason: "synthesis ended before the last row".to_string(),
            })?;

        export_grid_as_png(&output, &path_str(&output_path(input_path))?)?;

        if self.cli.tile {
            let tiled = tile_grid(&output, TILE_PREVIEW_REPEAT, TILE_PREVIEW_REPEAT)?;
            export_grid_as_png(&tiled, &path_str(&suffixed_path(input_path, TILED_SUFFIX, "png"))?)?;
        }

        if let Some(capture) = capture {
            capture.export_gif(
                &path_str(&suffixed_path(input_path, VISUALIZATION_SUFFIX, "gif"))?,
                GIF_FRAME_DELAY_MS,
            )?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(())
    }

    fn record_row(
        &mut self,
        index: usize,
        start_time: Instant,
        state: &SynthesisState,
        capture: Option<&mut VisualizationCapture>,
    ) -> Result<()> {
        let rows = state.rows_completed();
        if let Some(ref mut pm) = self.progress_manager {
            pm.update_rows(index, rows, start_time.elapsed());
        }
        if let Some(capture) = capture {
            capture.record_rows(rows, state.output())?;
        }
        Ok(())
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

/// Whether a file was written by a previous run rather than supplied as a source
fn is_derived_output(path: &Path) -> bool {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    stem.ends_with(OUTPUT_SUFFIX) || stem.ends_with(TILED_SUFFIX)
}

fn path_str(path: &Path) -> Result<String> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| path_error("Invalid output path"))
}

/// Sibling of `input_path` named `<stem><suffix>.<extension>`
pub fn suffixed_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    input_path
        .parent()
        .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
}

/// Path of the synthesized PNG for `input_path`
pub fn output_path(input_path: &Path) -> PathBuf {
    suffixed_path(input_path, OUTPUT_SUFFIX, "png")
}
