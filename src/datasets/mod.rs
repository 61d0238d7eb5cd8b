//! Synthetic datasets for tests and benchmarks.

use crate::error::{NeighborsError, Result};
use crate::primitives::Matrix;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Generates isotropic Gaussian blobs.
///
/// Centers are drawn uniformly from `[-10, 10]` in every dimension. Samples
/// are spread evenly across centers, the remainder going to the first ones,
/// then shuffled. Returns the points and the center each point was drawn
/// around.
///
/// # Errors
///
/// Returns an error if any count is zero or `cluster_std` is negative or
/// not finite.
///
/// # Examples
///
/// ```
/// use kneighbors::datasets::make_blobs;
///
/// let (x, labels) = make_blobs(100, 3, 4, 1.0, Some(42)).expect("valid arguments");
/// assert_eq!(x.shape(), (100, 3));
/// assert!(labels.iter().all(|&c| c < 4));
/// ```
pub fn make_blobs(
    n_samples: usize,
    n_features: usize,
    centers: usize,
    cluster_std: f64,
    random_state: Option<u64>,
) -> Result<(Matrix<f64>, Vec<usize>)> {
    if n_samples == 0 || n_features == 0 {
        return Err(NeighborsError::empty_input(&format!(
            "cannot generate a {n_samples}x{n_features} dataset"
        )));
    }
    if centers == 0 {
        return Err(NeighborsError::invalid_hyperparameter("centers", centers, ">= 1"));
    }
    if !cluster_std.is_finite() || cluster_std < 0.0 {
        return Err(NeighborsError::invalid_hyperparameter(
            "cluster_std",
            cluster_std,
            "finite and >= 0",
        ));
    }

    let mut rng = match random_state {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let center_points: Vec<f64> = (0..centers * n_features)
        .map(|_| rng.gen_range(-10.0..=10.0))
        .collect();

    let mut labels: Vec<usize> = (0..centers)
        .flat_map(|c| {
            let size = n_samples / centers + usize::from(c < n_samples % centers);
            std::iter::repeat(c).take(size)
        })
        .collect();
    labels.shuffle(&mut rng);

    let mut data = Vec::with_capacity(n_samples * n_features);
    for &label in &labels {
        let center = &center_points[label * n_features..(label + 1) * n_features];
        for &mu in center {
            data.push(mu + cluster_std * standard_normal(&mut rng));
        }
    }

    let x = Matrix::from_vec(n_samples, n_features, data)?;
    Ok((x, labels))
}

// Box-Muller transform
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
