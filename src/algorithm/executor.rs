//! Synthesis engine: noise seeding followed by a causal row-major scan
//!
//! Lifecycle is `Uninitialized -> Seeded -> Complete`:
//! - [`SynthesisEngine`] holds a validated request (`Uninitialized`)
//! - seeding allocates the output as RGB noise with opaque alpha and yields a
//!   [`SynthesisState`] (`Seeded`)
//! - stepping the state replaces each output pixel's RGB with that of the best
//!   matching source pixel, in row-major order, until every pixel is written (`Complete`)
//!
//! Invalid requests are rejected before any output buffer is allocated.

use crate::algorithm::matching::{MatchFinder, MatchStrategy};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::{CHANNELS, OPAQUE, Pixel, PixelGrid};
use crate::spatial::neighborhood::NeighborOffsets;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Parameters of a single synthesis run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Causal neighborhood radius
    pub neighbor_count: usize,
    /// Output width in pixels
    pub target_width: usize,
    /// Output height in pixels
    pub target_height: usize,
    /// Candidate search strategy
    pub strategy: MatchStrategy,
}

impl SynthesisConfig {
    /// Sequential configuration for the given radius and output size
    pub const fn new(neighbor_count: usize, target_width: usize, target_height: usize) -> Self {
        Self {
            neighbor_count,
            target_width,
            target_height,
            strategy: MatchStrategy::Exhaustive,
        }
    }

    /// Replace the candidate search strategy
    #[must_use]
    pub const fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Lifecycle phase of a synthesis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Request validated, no output allocated
    Uninitialized,
    /// Output holds noise and possibly some synthesized pixels
    Seeded,
    /// Every output pixel has been synthesized
    Complete,
}

/// Check a request before any allocation
///
/// # Errors
///
/// Returns an error if:
/// - A target dimension is zero, or the target area does not fit in memory
///   indexing (`InvalidDimension`)
/// - The source has no pixels (`EmptySource`)
/// - The radius is zero, or its window `2 * radius + 1` is wider than the smaller
///   source dimension so offsets would wrap onto each other (`InvalidRadius`)
pub fn validate(source: &PixelGrid, config: &SynthesisConfig) -> Result<()> {
    if config.target_width == 0 {
        return Err(AlgorithmError::InvalidDimension {
            parameter: "target width",
            value: config.target_width,
        });
    }
    if config.target_height == 0 {
        return Err(AlgorithmError::InvalidDimension {
            parameter: "target height",
            value: config.target_height,
        });
    }
    if config
        .target_width
        .checked_mul(config.target_height)
        .and_then(|area| area.checked_mul(CHANNELS))
        .is_none()
    {
        return Err(AlgorithmError::InvalidDimension {
            parameter: "target height",
            value: config.target_height,
        });
    }
    if source.is_empty() {
        return Err(AlgorithmError::EmptySource);
    }

    let radius = config.neighbor_count;
    let smallest = source.width().min(source.height());
    // Same as `2 * radius + 1 > smallest` without overflowing; `smallest >= 1` here
    if radius == 0 || radius > (smallest - 1) / 2 {
        return Err(AlgorithmError::InvalidRadius {
            radius,
            source_width: source.width(),
            source_height: source.height(),
        });
    }

    Ok(())
}

/// Output grid filled with uniform random RGB and opaque alpha
///
/// # Errors
///
/// Returns an error if width or height is zero
pub fn seed_noise<R: Rng>(width: usize, height: usize, rng: &mut R) -> Result<PixelGrid> {
    let pixels = (0..width * height)
        .map(|_| [rng.random(), rng.random(), rng.random(), OPAQUE])
        .collect();
    PixelGrid::from_pixels(width, height, pixels)
}

/// Validated synthesis request awaiting its seed buffer
#[derive(Debug, Clone)]
pub struct SynthesisEngine {
    source: PixelGrid,
    config: SynthesisConfig,
}

impl SynthesisEngine {
    /// Validate a request against its source grid
    ///
    /// # Errors
    ///
    /// Returns the first precondition failure reported by [`validate`]
    pub fn new(source: PixelGrid, config: SynthesisConfig) -> Result<Self> {
        validate(&source, &config)?;
        Ok(Self { source, config })
    }

    /// Always [`Phase::Uninitialized`]
    #[allow(clippy::unused_self)]
    pub const fn phase(&self) -> Phase {
        Phase::Uninitialized
    }

    /// Request parameters
    pub const fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Source grid
    pub const fn source(&self) -> &PixelGrid {
        &self.source
    }

    /// Seed the output with noise from a deterministic generator
    ///
    /// # Errors
    ///
    /// Returns an error if the output grid cannot be allocated
    pub fn seed(self, seed: u64) -> Result<SynthesisState> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.seed_with_rng(&mut rng)
    }

    /// Seed the output with noise drawn from `rng`
    ///
    /// # Errors
    ///
    /// Returns an error if the output grid cannot be allocated
    pub fn seed_with_rng<R: Rng>(self, rng: &mut R) -> Result<SynthesisState> {
        let output = seed_noise(self.config.target_width, self.config.target_height, rng)?;
        Ok(self.into_state(output))
    }

    /// Use `initial` as the seeded output instead of generated noise
    ///
    /// Alpha is forced to opaque so the output invariant holds regardless of input.
    ///
    /// # Errors
    ///
    /// Returns an error if `initial` does not match the target dimensions
    pub fn seed_with_buffer(self, mut initial: PixelGrid) -> Result<SynthesisState> {
        if initial.width() != self.config.target_width
            || initial.height() != self.config.target_height
        {
            return Err(AlgorithmError::InvalidSourceData {
                reason: format!(
                    "seed buffer is {}x{}, target is {}x{}",
                    initial.width(),
                    initial.height(),
                    self.config.target_width,
                    self.config.target_height
                ),
            });
        }
        initial.make_opaque();
        Ok(self.into_state(initial))
    }

    fn into_state(self, output: PixelGrid) -> SynthesisState {
        let offsets = NeighborOffsets::causal(self.config.neighbor_count);
        let finder = MatchFinder::new(&self.source, &offsets, self.config.strategy);
        let target_neighborhood = Vec::with_capacity(offsets.len());

        SynthesisState {
            source: self.source,
            output,
            offsets,
            finder,
            cursor: 0,
            target_neighborhood,
        }
    }
}

/// Seeded run: the output buffer plus everything needed to advance the scan
///
/// The output has a single writer (this state). Each step reads the already
/// generated neighborhood of the next pixel from the same buffer it writes into.
#[derive(Debug, Clone)]
pub struct SynthesisState {
    source: PixelGrid,
    output: PixelGrid,
    offsets: NeighborOffsets,
    finder: MatchFinder,
    cursor: usize,
    target_neighborhood: Vec<Pixel>,
}

impl SynthesisState {
    /// [`Phase::Seeded`] until the last pixel is written, then [`Phase::Complete`]
    pub fn phase(&self) -> Phase {
        if self.is_complete() {
            Phase::Complete
        } else {
            Phase::Seeded
        }
    }

    /// Whether every output pixel has been synthesized
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.output.len()
    }

    /// Number of output pixels synthesized so far
    pub const fn pixels_completed(&self) -> usize {
        self.cursor
    }

    /// Number of fully synthesized output rows
    pub fn rows_completed(&self) -> usize {
        self.cursor / self.output.width()
    }

    /// Current output buffer, partially synthesized while [`Phase::Seeded`]
    pub const fn output(&self) -> &PixelGrid {
        &self.output
    }

    /// Synthesize the next output pixel in row-major order
    ///
    /// Returns whether pixels remain afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the match search rejects the target neighborhood
    pub fn step(&mut self) -> Result<bool> {
        if self.is_complete() {
            return Ok(false);
        }

        let width = self.output.width();
        let (x, y) = (self.cursor % width, self.cursor / width);

        self.target_neighborhood.clear();
        self.offsets
            .gather(&self.output, x, y, &mut self.target_neighborhood);

        let found = self.finder.find_match(&self.target_neighborhood)?;
        let matched = self.source.get(found.x, found.y).ok_or_else(|| {
            AlgorithmError::InvalidSourceData {
                reason: format!("match ({}, {}) lies outside the source", found.x, found.y),
            }
        })?;

        self.output.write_rgb(x, y, matched);
        self.cursor += 1;

        Ok(!self.is_complete())
    }

    /// Synthesize the remainder of the current output row
    ///
    /// Returns whether rows remain afterwards.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::step`]
    pub fn synthesize_row(&mut self) -> Result<bool> {
        let width = self.output.width();
        let row = self.cursor / width;

        while self.step()? {
            if self.cursor.is_multiple_of(width) {
                break;
            }
        }

        tracing::debug!(row, rows = self.output.height(), "generated row");
        Ok(!self.is_complete())
    }

    /// Synthesize every remaining pixel and hand over the output
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::step`]; no partial output is returned
    pub fn run(mut self) -> Result<PixelGrid> {
        while self.synthesize_row()? {}
        Ok(self.finish_output())
    }

    /// Completed output, or `None` while pixels remain
    pub fn into_output(self) -> Option<PixelGrid> {
        self.is_complete().then(|| self.finish_output())
    }

    fn finish_output(self) -> PixelGrid {
        tracing::info!(
            width = self.output.width(),
            height = self.output.height(),
            radius = self.offsets.radius(),
            "synthesis complete"
        );
        self.output
    }
}

/// Validate, seed from `seed` and run a complete synthesis
///
/// # Errors
///
/// Returns a precondition failure from [`validate`] before any work is done
#[tracing::instrument(skip(source), fields(source_width = source.width(), source_height = source.height()))]
pub fn synthesize(source: PixelGrid, config: SynthesisConfig, seed: u64) -> Result<PixelGrid> {
    SynthesisEngine::new(source, config)?.seed(seed)?.run()
}
