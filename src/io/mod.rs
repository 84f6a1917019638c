//! Input/output collaborators around the synthesis core

/// Command-line interface and batch file processing
pub mod cli;
/// Default constants
pub mod configuration;
/// Error types
pub mod error;
/// PNG loading and export
pub mod image;
/// Terminal progress display
pub mod progress;
/// Animated GIF capture of synthesis progress
pub mod visualization;
