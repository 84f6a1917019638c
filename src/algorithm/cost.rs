//! Squared RGB distance between neighborhoods
//!
//! Alpha never contributes to cost. Costs are exact integer sums so ties are
//! decided only by scan order.

use crate::spatial::grid::Pixel;

/// Sum of squared differences over the R, G and B channels of two pixels
pub const fn pixel_cost(a: &Pixel, b: &Pixel) -> u32 {
    let dr = a[0].abs_diff(b[0]) as u32;
    let dg = a[1].abs_diff(b[1]) as u32;
    let db = a[2].abs_diff(b[2]) as u32;
    dr * dr + dg * dg + db * db
}

/// Total cost between two ordered neighborhoods
///
/// Corresponding positions are compared pairwise; both sequences are expected to
/// come from the same offset set and therefore have equal length.
pub fn neighborhood_cost(a: &[Pixel], b: &[Pixel]) -> u64 {
    a.iter()
        .zip(b)
        .map(|(p, q)| u64::from(pixel_cost(p, q)))
        .sum()
}

/// Total cost if it is strictly below `bound`, otherwise `None`
///
/// Stops as soon as the running sum reaches `bound`, since such a candidate can
/// never replace a strict minimum.
pub fn bounded_neighborhood_cost(a: &[Pixel], b: &[Pixel], bound: u64) -> Option<u64> {
    let mut total = 0u64;
    for (p, q) in a.iter().zip(b) {
        total += u64::from(pixel_cost(p, q));
        if total >= bound {
            return None;
        }
    }
    (total < bound).then_some(total)
}
