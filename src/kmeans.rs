//! Seeded Lloyd's-style k-means over the extracted dataset.
//!
//! Numeric behavior is pinned down tightly so palettes reproduce
//! bit-for-bit: centroids are seeded from deterministic generator draws,
//! cluster means are folded incrementally in dataset order, and
//! convergence requires exact floating-point equality of every centroid
//! across one full iteration. Because exact equality on oscillating means
//! is not guaranteed to ever hold, the loop carries a hard iteration cap
//! and returns the current palette when it is reached.

use crate::error::ReduceError;
use crate::nearest::nearest_neighbor;
use crate::rng::SeededRng;
use crate::{Centroid, Palette, Pixel, CHANNELS};

/// Safety bound on Lloyd iterations. Hitting it yields a usable palette,
/// logged as degraded rather than reported as an error.
pub const MAX_ITERATIONS: usize = 300;

/// Cluster `dataset` into `color_count` centroids with the default seed 0.
pub fn cluster(dataset: &[Pixel], color_count: usize) -> Result<Palette, ReduceError> {
    cluster_seeded(dataset, color_count, 0)
}

/// Cluster `dataset` into `color_count` centroids, drawing initialization
/// and empty-cluster recovery indices from a generator seeded with `seed`.
///
/// `color_count` greater than the dataset size is clamped to the dataset
/// size; anything below 1 is rejected. Duplicate initial centroids are
/// permitted — distinct draws may land on equal pixels.
pub fn cluster_seeded(
    dataset: &[Pixel],
    color_count: usize,
    seed: u32,
) -> Result<Palette, ReduceError> {
    if dataset.is_empty() {
        return Err(ReduceError::EmptyDataset);
    }
    if color_count < 1 {
        return Err(ReduceError::InvalidColorCount(color_count));
    }
    if !dataset
        .iter()
        .all(|p| p.iter().all(|sample| sample.is_finite()))
    {
        return Err(ReduceError::NonFiniteSample("dataset"));
    }
    let k = color_count.min(dataset.len());

    let mut rng = SeededRng::new(seed);
    let mut centroids: Palette = (0..k)
        .map(|_| dataset[rng.pick_index(dataset.len())])
        .collect();

    for iteration in 0..MAX_ITERATIONS {
        // Assignment folded directly into per-cluster running means; one
        // pass over the dataset in order keeps the rounding sequence of
        // each mean identical across runs.
        let mut means: Vec<Centroid> = vec![[0.0; CHANNELS]; k];
        let mut sizes = vec![0usize; k];
        for pixel in dataset {
            let assigned = nearest_neighbor(pixel, &centroids);
            sizes[assigned] += 1;
            let n = sizes[assigned] as f64;
            for c in 0..CHANNELS {
                means[assigned][c] += (pixel[c] - means[assigned][c]) / n;
            }
        }

        // Empty clusters get re-seeded from a fresh draw, exactly like
        // initialization.
        for (mean, size) in means.iter_mut().zip(&sizes) {
            if *size == 0 {
                *mean = dataset[rng.pick_index(dataset.len())];
            }
        }

        if !means
            .iter()
            .all(|m| m.iter().all(|sample| sample.is_finite()))
        {
            return Err(ReduceError::NonFiniteSample("centroids"));
        }

        // Exact equality across all channels of all centroids.
        let converged = means == centroids;
        centroids = means;
        if converged {
            log::info!("k-means converged after {} iterations", iteration + 1);
            return Ok(centroids);
        }
    }

    log::warn!(
        "k-means did not converge within {MAX_ITERATIONS} iterations; \
         returning the current palette"
    );
    Ok(centroids)
}
