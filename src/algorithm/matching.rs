//! Brute-force nearest-neighborhood search over the source grid
//!
//! Every source coordinate is a candidate. Candidate neighborhoods are gathered once
//! into a flat table (one contiguous run of `offsets.len()` pixels per candidate, in
//! row-major candidate order), so each query is a linear sweep over that table.
//!
//! Candidates are scanned row-major (`y` outer, `x` inner). A candidate only replaces
//! the current best when its cost is strictly lower, so ties resolve to the first
//! coordinate in scan order. The parallel strategy reduces by `(cost, scan index)` and
//! therefore returns exactly the same coordinate.

use crate::algorithm::cost::{bounded_neighborhood_cost, neighborhood_cost};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::{Pixel, PixelGrid};
use crate::spatial::neighborhood::NeighborOffsets;
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSlice};

/// Candidates handed to a single rayon task by the parallel scan
const PARALLEL_CANDIDATES_PER_TASK: usize = 256;

/// How the candidate table is searched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Sequential row-major scan of every candidate
    #[default]
    Exhaustive,
    /// Every candidate, split across rayon workers for a single query
    Parallel,
}

/// Best source coordinate for a target neighborhood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Source column
    pub x: usize,
    /// Source row
    pub y: usize,
    /// Cost of the source neighborhood against the target neighborhood
    pub cost: u64,
}

/// Exhaustive matcher holding every source neighborhood
#[derive(Debug, Clone)]
pub struct MatchFinder {
    table: Vec<Pixel>,
    neighborhood_len: usize,
    source_width: usize,
    source_height: usize,
    strategy: MatchStrategy,
}

impl MatchFinder {
    /// Gather the neighborhood of every source coordinate
    pub fn new(source: &PixelGrid, offsets: &NeighborOffsets, strategy: MatchStrategy) -> Self {
        let (width, height) = (source.width(), source.height());
        let mut table = Vec::with_capacity(width * height * offsets.len());

        for y in 0..height {
            for x in 0..width {
                offsets.gather(source, x, y, &mut table);
            }
        }

        Self {
            table,
            neighborhood_len: offsets.len(),
            source_width: width,
            source_height: height,
            strategy,
        }
    }

    /// Number of pixels in each compared neighborhood
    pub const fn neighborhood_len(&self) -> usize {
        self.neighborhood_len
    }

    /// Strategy used by [`Self::find_match`]
    pub const fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Source neighborhood of `(x, y)`, or `None` outside the source grid
    pub fn candidate(&self, x: usize, y: usize) -> Option<&[Pixel]> {
        if x >= self.source_width || y >= self.source_height {
            return None;
        }
        let start = (y * self.source_width + x) * self.neighborhood_len;
        self.table.get(start..start + self.neighborhood_len)
    }

    /// Cost of the source neighborhood at `(x, y)` against `target`
    pub fn candidate_cost(&self, x: usize, y: usize, target: &[Pixel]) -> Option<u64> {
        self.candidate(x, y)
            .map(|neighborhood| neighborhood_cost(neighborhood, target))
    }

    /// Source coordinate whose neighborhood is closest to `target`
    ///
    /// # Errors
    ///
    /// Returns an error if `target` does not have [`Self::neighborhood_len`] pixels
    pub fn find_match(&self, target: &[Pixel]) -> Result<Match> {
        if target.len() != self.neighborhood_len {
            return Err(AlgorithmError::NeighborhoodMismatch {
                expected: self.neighborhood_len,
                actual: target.len(),
            });
        }

        // Every candidate ties at zero cost, so the first one wins
        if self.neighborhood_len == 0 {
            return Ok(Match {
                x: 0,
                y: 0,
                cost: 0,
            });
        }

        let best = match self.strategy {
            MatchStrategy::Exhaustive => self.scan(target, 0, &self.table),
            MatchStrategy::Parallel => self
                .table
                .par_chunks(self.neighborhood_len * PARALLEL_CANDIDATES_PER_TASK)
                .enumerate()
                .filter_map(|(task, candidates)| {
                    self.scan(target, task * PARALLEL_CANDIDATES_PER_TASK, candidates)
                })
                .min_by_key(|&(cost, index)| (cost, index)),
        };

        let (cost, index) = best.ok_or_else(|| AlgorithmError::InvalidSourceData {
            reason: "source grid has no candidate neighborhoods".to_string(),
        })?;

        Ok(Match {
            x: index % self.source_width,
            y: index / self.source_width,
            cost,
        })
    }

    /// Strict minimum over a run of candidates starting at scan index `first`
    fn scan(&self, target: &[Pixel], first: usize, candidates: &[Pixel]) -> Option<(u64, usize)> {
        let mut best: Option<(u64, usize)> = None;

        for (offset, neighborhood) in candidates.chunks_exact(self.neighborhood_len).enumerate() {
            let bound = best.map_or(u64::MAX, |(cost, _)| cost);
            if let Some(cost) = bounded_neighborhood_cost(neighborhood, target, bound) {
                best = Some((cost, first + offset));
                if cost == 0 {
                    break;
                }
            }
        }

        best
    }
}
