//! Greedy causal texture synthesis from a source image
//!
//! The output is seeded with random noise and then filled in row-major order. Each
//! output pixel takes the color of the source pixel whose causal neighborhood (the
//! pixels above it and to its left, wrapping around the edges) is closest to the
//! neighborhood already generated around the output position.

#![forbid(unsafe_code)]

/// Cost function, match search and synthesis engine
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Pixel grids and neighborhood geometry
pub mod spatial;

pub use algorithm::executor::{SynthesisConfig, SynthesisEngine, SynthesisState, synthesize};
pub use io::error::{AlgorithmError, Result};
pub use spatial::{Pixel, PixelGrid};
