//! Spatial data structures for synthesis
//!
//! This module contains spatial-related functionality including:
//! - Toroidal pixel grids
//! - Causal neighborhood offsets and coordinate resolution

/// Pixel grid storage with wrap-around lookup
pub mod grid;
/// Causal neighbor offsets and their resolution onto a grid
pub mod neighborhood;

pub use grid::{Pixel, PixelGrid};
pub use neighborhood::NeighborOffsets;
