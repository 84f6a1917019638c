//! Causal neighborhood offsets for scan-order synthesis
//!
//! A causal neighborhood only contains positions that precede the current pixel in
//! row-major order: the `radius` rows above it across `2 * radius + 1` columns, then the
//! `radius` pixels to its left. Offsets are relative, so the same set is applied to the
//! source and the target grid and only the wrapping bounds differ.

use crate::spatial::grid::{Pixel, PixelGrid, wrap_coordinate};

/// Relative neighbor position as `[dx, dy]`
pub type Offset = [i64; 2];

/// Number of offsets in a causal neighborhood of the given radius
pub const fn causal_len(radius: usize) -> usize {
    2 * radius * radius + 2 * radius
}

/// Ordered causal offset set for a fixed radius
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborOffsets {
    radius: usize,
    offsets: Vec<Offset>,
}

impl NeighborOffsets {
    /// Build the causal offset set
    ///
    /// Rows `dy = -radius..-1` each span `dx = -radius..=radius`, followed by
    /// `dx = -radius..-1` on the current row. The order is fixed so that costs
    /// always compare corresponding positions.
    pub fn causal(radius: usize) -> Self {
        let r = radius as i64;
        let mut offsets = Vec::with_capacity(causal_len(radius));

        for dy in -r..0 {
            for dx in -r..=r {
                offsets.push([dx, dy]);
            }
        }
        for dx in -r..0 {
            offsets.push([dx, 0]);
        }

        Self { radius, offsets }
    }

    /// Radius the set was built from
    pub const fn radius(&self) -> usize {
        self.radius
    }

    /// Number of offsets
    pub const fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the set has no offsets (radius 0)
    pub const fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offsets in comparison order
    pub const fn as_slice(&self) -> &[Offset] {
        self.offsets.as_slice()
    }

    /// Absolute `[x, y]` coordinates around `(x, y)` wrapped onto a `width` x `height` grid
    pub fn resolve(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = [usize; 2]> + '_ {
        self.offsets.iter().map(move |&[dx, dy]| {
            [
                wrap_coordinate(x as i64 + dx, width),
                wrap_coordinate(y as i64 + dy, height),
            ]
        })
    }

    /// Append the pixels of the neighborhood around `(x, y)` in `grid` to `out`
    pub fn gather(&self, grid: &PixelGrid, x: usize, y: usize, out: &mut Vec<Pixel>) {
        out.extend(
            self.offsets
                .iter()
                .map(|&[dx, dy]| grid.pixel_at(x as i64 + dx, y as i64 + dy)),
        );
    }
}

/// Ordered causal neighbor coordinates of `(x, y)` on a `width` x `height` torus
pub fn neighbors(x: usize, y: usize, width: usize, height: usize, radius: usize) -> Vec<[usize; 2]> {
    NeighborOffsets::causal(radius)
        .resolve(x, y, width, height)
        .collect()
}
