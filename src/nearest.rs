//! Nearest-neighbor search over candidate points, shared by the
//! clustering assignment step and the final remapping pass.

use crate::{Centroid, CHANNELS};

/// Squared Euclidean distance between two points.
#[inline]
pub fn distance_squared(a: &[f64; CHANNELS], b: &[f64; CHANNELS]) -> f64 {
    let mut sum = 0.0;
    for c in 0..CHANNELS {
        let d = a[c] - b[c];
        sum += d * d;
    }
    sum
}

/// Index of the candidate closest to `query`. Ties resolve to the lowest
/// index because only a strictly smaller distance replaces the current
/// best. `candidates` must be non-empty.
pub fn nearest_neighbor(query: &[f64; CHANNELS], candidates: &[Centroid]) -> usize {
    debug_assert!(!candidates.is_empty());
    let mut best_index = 0;
    let mut best_distance = f64::INFINITY;
    for (index, candidate) in candidates.iter().enumerate() {
        let distance = distance_squared(query, candidate);
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }
    best_index
}
