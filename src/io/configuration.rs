//! Synthesis constants and runtime configuration defaults

/// Default causal neighborhood radius
pub const DEFAULT_NEIGHBOR_COUNT: usize = 2;

/// Fixed seed for reproducible noise
pub const DEFAULT_SEED: u64 = 42;

// Brute force is quadratic in image area, keep requests from running for days
/// Maximum allowed target dimension
pub const MAX_TARGET_DIMENSION: usize = 4_096;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to synthesized output filenames
pub const OUTPUT_SUFFIX: &str = "_retextured";
/// Suffix added to tiled preview filenames
pub const TILED_SUFFIX: &str = "_tiled";
/// Suffix added to visualization filenames
pub const VISUALIZATION_SUFFIX: &str = "_visualization";
/// Number of copies of the output placed across and down in a tiled preview
pub const TILE_PREVIEW_REPEAT: usize = 2;

// Visualization settings
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Upper bound on captured frames; tall outputs capture every few rows
pub const MAX_VISUALIZATION_FRAMES: usize = 120;
/// Multiplier applied to the delay of the final frame
pub const FINAL_FRAME_HOLD: u32 = 25;
