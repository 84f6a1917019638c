//! PNG loading into pixel grids and export of synthesized output

use crate::io::error::{AlgorithmError, Result, file_system_error, invalid_parameter};
use crate::spatial::grid::PixelGrid;
use image::RgbaImage;
use std::path::Path;

/// Load an image file as an RGBA pixel grid
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The decoded image has no pixels
pub fn load_pixel_grid<P: AsRef<Path>>(path: P) -> Result<PixelGrid> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    let rgba = img.to_rgba8();

    PixelGrid::from_rgba(rgba.width() as usize, rgba.height() as usize, rgba.as_raw())
}

/// Convert a pixel grid into an `image` RGBA buffer
///
/// # Errors
///
/// Returns an error if the grid dimensions do not fit an image buffer
pub fn grid_to_image(grid: &PixelGrid) -> Result<RgbaImage> {
    let width = u32::try_from(grid.width()).map_err(|e| AlgorithmError::InvalidSourceData {
        reason: format!("width {} exceeds image limits: {e}", grid.width()),
    })?;
    let height = u32::try_from(grid.height()).map_err(|e| AlgorithmError::InvalidSourceData {
        reason: format!("height {} exceeds image limits: {e}", grid.height()),
    })?;

    RgbaImage::from_raw(width, height, grid.to_rgba_bytes()).ok_or_else(|| {
        AlgorithmError::InvalidSourceData {
            reason: "Failed to create image from grid data".to_string(),
        }
    })
}

/// Repeat a grid `across` times horizontally and `down` times vertically
///
/// Seams between the copies show how well the synthesized texture tiles.
///
/// # Errors
///
/// Returns `InvalidParameter` if either repeat count is zero or the tiled
/// size overflows
pub fn tile_grid(grid: &PixelGrid, across: usize, down: usize) -> Result<PixelGrid> {
    if across == 0 {
        return Err(invalid_parameter("across", &across, &"must be positive"));
    }
    if down == 0 {
        return Err(invalid_parameter("down", &down, &"must be positive"));
    }

    let width = grid
        .width()
        .checked_mul(across)
        .ok_or_else(|| invalid_parameter("across", &across, &"tiled width overflows"))?;
    let height = grid
        .height()
        .checked_mul(down)
        .ok_or_else(|| invalid_parameter("down", &down, &"tiled height overflows"))?;

    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            pixels.push(grid.pixel_at(x as i64, y as i64));
        }
    }

    PixelGrid::from_pixels(width, height, pixels)
}

/// Export a pixel grid as a PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &PixelGrid, output_path: &str) -> Result<()> {
    let img = grid_to_image(grid)?;

    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).map_err(file_system_error(parent, "create directory"))?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.into(),
            source: e,
        })?;

    Ok(())
}
