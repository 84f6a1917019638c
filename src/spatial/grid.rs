//! Toroidal RGBA pixel grids backed by ndarray storage
//!
//! Grids are stored as `(rows, cols)` arrays of RGBA pixels. Every coordinate lookup
//! through [`PixelGrid::pixel_at`] wraps around the grid edges, so neighborhoods near
//! the border continue on the opposite side instead of falling off the image.

use crate::io::error::{AlgorithmError, Result};
use ndarray::Array2;

/// RGBA channel values of a single pixel
pub type Pixel = [u8; 4];

/// Number of channels stored per pixel in raw buffers
pub const CHANNELS: usize = 4;

/// Alpha value carried by every synthesized pixel
pub const OPAQUE: u8 = 255;

/// Resolves a possibly negative coordinate onto `[0, extent)` by toroidal wraparound
///
/// A zero extent has no valid coordinates and resolves to 0.
pub const fn wrap_coordinate(value: i64, extent: usize) -> usize {
    match value.checked_rem_euclid(extent as i64) {
        Some(wrapped) => wrapped as usize,
        None => 0,
    }
}

/// Rectangular RGBA pixel grid with wrap-around coordinate resolution
///
/// The public surface is read-only; only the synthesis engine writes into the
/// output grid it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pixels: Array2<Pixel>,
}

impl PixelGrid {
    /// Build a grid from a row-major RGBA byte buffer (4 bytes per pixel)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The buffer is empty (`EmptySource`)
    /// - Width or height is zero (`InvalidDimension`)
    /// - The buffer length is not `width * height * 4` (`InvalidSourceData`)
    pub fn from_rgba(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(AlgorithmError::EmptySource);
        }
        check_dimensions(width, height)?;

        let expected = width
            .checked_mul(height)
            .and_then(|count| count.checked_mul(CHANNELS));
        if expected != Some(data.len()) {
            return Err(AlgorithmError::InvalidSourceData {
                reason: format!(
                    "expected {width}x{height}x{CHANNELS} bytes, found {}",
                    data.len()
                ),
            });
        }

        let (chunks, _) = data.as_chunks::<CHANNELS>();
        Self::from_pixels(width, height, chunks.to_vec())
    }

    /// Build a grid from row-major pixels
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No pixels are supplied (`EmptySource`)
    /// - Width or height is zero (`InvalidDimension`)
    /// - The pixel count is not `width * height` (`InvalidSourceData`)
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self> {
        if pixels.is_empty() {
            return Err(AlgorithmError::EmptySource);
        }
        check_dimensions(width, height)?;

        let count = pixels.len();
        Array2::from_shape_vec((height, width), pixels)
            .map(|pixels| Self { pixels })
            .map_err(|e| AlgorithmError::InvalidSourceData {
                reason: format!("{count} pixels do not form a {width}x{height} grid: {e}"),
            })
    }

    /// Build a grid where every pixel has the same value
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            pixels: Array2::from_elem((height, width), pixel),
        })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Total pixel count
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the grid holds no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at `(x, y)` after wrapping both coordinates onto the grid
    pub fn pixel_at(&self, x: i64, y: i64) -> Pixel {
        let col = wrap_coordinate(x, self.width());
        let row = wrap_coordinate(y, self.height());
        self.pixels.get((row, col)).copied().unwrap_or_default()
    }

    /// Pixel at in-range `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        self.pixels.get((y, x)).copied()
    }

    /// Iterate over pixels in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Pixel> {
        self.pixels.iter()
    }

    /// Row-major RGBA bytes, 4 per pixel, suitable for a direct blit
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    /// Overwrite the RGB channels at `(x, y)`, leaving alpha untouched
    pub(crate) fn write_rgb(&mut self, x: usize, y: usize, source: Pixel) {
        if let Some(pixel) = self.pixels.get_mut((y, x)) {
            pixel[..3].copy_from_slice(&source[..3]);
        }
    }

    /// Force every alpha channel to [`OPAQUE`]
    pub(crate) fn make_opaque(&mut self) {
        for pixel in &mut self.pixels {
            pixel[3] = OPAQUE;
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 {
        return Err(AlgorithmError::InvalidDimension {
            parameter: "width",
            value: width,
        });
    }
    if height == 0 {
        return Err(AlgorithmError::InvalidDimension {
            parameter: "height",
            value: height,
        });
    }
    Ok(())
}
