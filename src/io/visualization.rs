//! Frame capture and GIF generation for synthesis visualization

use crate::io::configuration::{FINAL_FRAME_HOLD, MAX_VISUALIZATION_FRAMES, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{AlgorithmError, Result, file_system_error};
use crate::io::image::grid_to_image;
use crate::spatial::grid::PixelGrid;
use image::{Delay, Frame, RgbaImage};

/// Captures snapshots of the output buffer as rows are synthesized
///
/// The first frame is the seeded noise; later frames are taken every
/// `rows_per_frame` completed rows, and the completed output is always captured.
pub struct VisualizationCapture {
    frames: Vec<RgbaImage>,
    rows_per_frame: usize,
}

impl VisualizationCapture {
    /// Capture sized for an output with `total_rows` rows
    pub fn new(total_rows: usize) -> Self {
        let rows_per_frame = total_rows.div_ceil(MAX_VISUALIZATION_FRAMES).max(1);
        Self {
            frames: Vec::with_capacity(total_rows / rows_per_frame + 2),
            rows_per_frame,
        }
    }

    /// Rows between consecutive captured frames
    pub const fn rows_per_frame(&self) -> usize {
        self.rows_per_frame
    }

    /// Record the seeded output before any row is synthesized
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be converted into an image
    pub fn record_seed(&mut self, grid: &PixelGrid) -> Result<()> {
        self.frames.push(grid_to_image(grid)?);
        Ok(())
    }

    /// Record the output after `rows_completed` rows, if a frame is due
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be converted into an image
    pub fn record_rows(&mut self, rows_completed: usize, grid: &PixelGrid) -> Result<()> {
        let finished = rows_completed >= grid.height();
        if finished || rows_completed.is_multiple_of(self.rows_per_frame) {
            self.frames.push(grid_to_image(grid)?);
        }
        Ok(())
    }

    /// Number of captured frames
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as an animated GIF
    ///
    /// Delays below what viewers support are raised to `VIEWER_MIN_FRAME_DELAY_MS`
    /// and frames are dropped to keep the apparent speed. The final frame is held
    /// `FINAL_FRAME_HOLD` times longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &str, frame_delay_ms: u32) -> Result<()> {
        let Some(last) = self.frames.last() else {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "No frames captured for visualization".to_string(),
            });
        };

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms).max(1) as usize;

        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .step_by(skip_factor)
            .map(|img| timed_frame(img.clone(), effective_delay_ms))
            .collect();
        frames.push(timed_frame(last.clone(), effective_delay_ms * FINAL_FRAME_HOLD));

        if let Some(parent) = std::path::Path::new(output_path).parent() {
            std::fs::create_dir_all(parent)
                .map_err(file_system_error(parent, "create directory"))?;
        }

        let file = std::fs::File::create(output_path)
            .map_err(file_system_error(output_path, "create file"))?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.into(),
                source: e,
            })?;

        Ok(())
    }
}

fn timed_frame(img: RgbaImage, delay_ms: u32) -> Frame {
    Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1))
}
