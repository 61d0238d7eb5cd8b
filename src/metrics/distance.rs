//! Metric identifiers and pairwise distance evaluation.
//!
//! Definitions follow SciPy's `scipy.spatial.distance` so results can be
//! checked against the usual CPU reference implementations. All sums are
//! accumulated in `f64` regardless of the storage precision.

use crate::error::{NeighborsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every metric name accepted by [`Metric::from_name`], aliases included.
pub const VALID_METRICS: &[&str] = &[
    "euclidean",
    "l2",
    "sqeuclidean",
    "manhattan",
    "l1",
    "cityblock",
    "taxicab",
    "chebyshev",
    "linf",
    "infinity",
    "minkowski",
    "lp",
    "cosine",
    "correlation",
    "canberra",
    "braycurtis",
    "haversine",
];

/// Distance metric used to rank neighbors.
///
/// # Examples
///
/// ```
/// use kneighbors::metrics::Metric;
///
/// let m = Metric::from_name("minkowski", Some(3.0)).expect("p >= 1");
/// let d = m.distance(&[0.0, 0.0], &[1.0, 1.0]);
/// assert!((d - 2.0_f64.powf(1.0 / 3.0)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum Metric {
    /// `sqrt(sum((x_i - y_i)^2))`
    Euclidean,
    /// `sum((x_i - y_i)^2)`
    SqEuclidean,
    /// `sum(|x_i - y_i|)`
    Manhattan,
    /// `max(|x_i - y_i|)`
    Chebyshev,
    /// `sum(|x_i - y_i|^p)^(1/p)`, `p >= 1`
    Minkowski {
        /// Exponent
        p: f64,
    },
    /// `1 - x.y / (|x| |y|)`
    Cosine,
    /// Cosine distance of the mean-centred vectors
    Correlation,
    /// `sum(|x_i - y_i| / (|x_i| + |y_i|))`
    Canberra,
    /// `sum(|x_i - y_i|) / sum(|x_i + y_i|)`
    BrayCurtis,
    /// Great-circle angle between `(latitude, longitude)` pairs in radians
    Haversine,
}

impl Default for Metric {
    fn default() -> Self {
        Self::Minkowski { p: 2.0 }
    }
}

impl Metric {
    /// Parses a metric name, attaching `p` for the Minkowski family.
    ///
    /// `p` is ignored for metrics that take no parameter. Minkowski without
    /// `p` defaults to `p = 2`.
    ///
    /// # Errors
    ///
    /// Returns [`NeighborsError::UnsupportedMetric`] for unknown names and
    /// [`NeighborsError::InvalidHyperparameter`] for an invalid `p`.
    pub fn from_name(name: &str, p: Option<f64>) -> Result<Self> {
        let metric = match name.to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Self::Euclidean,
            "sqeuclidean" => Self::SqEuclidean,
            "manhattan" | "l1" | "cityblock" | "taxicab" => Self::Manhattan,
            "chebyshev" | "linf" | "infinity" => Self::Chebyshev,
            "minkowski" | "lp" => Self::Minkowski {
                p: p.unwrap_or(2.0),
            },
            "cosine" => Self::Cosine,
            "correlation" => Self::Correlation,
            "canberra" => Self::Canberra,
            "braycurtis" => Self::BrayCurtis,
            "haversine" => Self::Haversine,
            _ => {
                return Err(NeighborsError::UnsupportedMetric {
                    name: name.to_string(),
                })
            }
        };
        metric.validate()?;
        Ok(metric)
    }

    /// Canonical name of the metric.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::SqEuclidean => "sqeuclidean",
            Self::Manhattan => "manhattan",
            Self::Chebyshev => "chebyshev",
            Self::Minkowski { .. } => "minkowski",
            Self::Cosine => "cosine",
            Self::Correlation => "correlation",
            Self::Canberra => "canberra",
            Self::BrayCurtis => "braycurtis",
            Self::Haversine => "haversine",
        }
    }

    /// Checks the metric's own parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if a Minkowski exponent is NaN or below 1.
    pub fn validate(&self) -> Result<()> {
        if let Self::Minkowski { p } = self {
            if p.is_nan() || *p < 1.0 {
                return Err(NeighborsError::invalid_hyperparameter("p", p, ">= 1"));
            }
        }
        Ok(())
    }

    /// Checks that the metric is defined for `n_features` dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if haversine is used with anything but 2 features.
    pub fn validate_features(&self, n_features: usize) -> Result<()> {
        if matches!(self, Self::Haversine) && n_features != 2 {
            return Err(NeighborsError::dimension_mismatch(
                "haversine n_features",
                2,
                n_features,
            ));
        }
        Ok(())
    }

    /// Distance between two points of equal dimension.
    ///
    /// The result is never negative, though it can be NaN when the input
    /// contains NaN.
    ///
    /// # Panics
    ///
    /// Panics if [`Metric::Haversine`] gets points with fewer than 2
    /// coordinates (see [`validate_features`](Self::validate_features)).
    /// Debug builds also panic when `a` and `b` differ in length.
    #[must_use]
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        let d = match *self {
            Self::Euclidean => sq_euclidean(a, b).sqrt(),
            Self::SqEuclidean => sq_euclidean(a, b),
            Self::Manhattan => manhattan(a, b),
            Self::Chebyshev => chebyshev(a, b),
            Self::Minkowski { p } => minkowski(a, b, p),
            Self::Cosine => cosine(a, b, false),
            Self::Correlation => cosine(a, b, true),
            Self::Canberra => canberra(a, b),
            Self::BrayCurtis => bray_curtis(a, b),
            Self::Haversine => haversine(a, b),
        };
        // -0.0 and rounding below zero both collapse to 0.0
        if d <= 0.0 {
            0.0
        } else {
            d
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minkowski { p } => write!(f, "minkowski(p={p})"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Metric {
    type Err = NeighborsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s, None)
    }
}

fn pairs<'a>(a: &'a [f32], b: &'a [f32]) -> impl Iterator<Item = (f64, f64)> + 'a {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (f64::from(x), f64::from(y)))
}

fn sq_euclidean(a: &[f32], b: &[f32]) -> f64 {
    pairs(a, b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn manhattan(a: &[f32], b: &[f32]) -> f64 {
    pairs(a, b).map(|(x, y)| (x - y).abs()).sum()
}

fn chebyshev(a: &[f32], b: &[f32]) -> f64 {
    pairs(a, b).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max)
}

#[allow(clippy::float_cmp)]
fn minkowski(a: &[f32], b: &[f32], p: f64) -> f64 {
    if p == 1.0 {
        manhattan(a, b)
    } else if p == 2.0 {
        sq_euclidean(a, b).sqrt()
    } else if p.is_infinite() {
        chebyshev(a, b)
    } else {
        let sum: f64 = pairs(a, b).map(|(x, y)| (x - y).abs().powf(p)).sum();
        sum.powf(p.recip())
    }
}

fn cosine(a: &[f32], b: &[f32], centred: bool) -> f64 {
    let (mean_a, mean_b) = if centred { (mean(a), mean(b)) } else { (0.0, 0.0) };
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in pairs(a, b) {
        let (x, y) = (x - mean_a, y - mean_b);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    (1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 2.0)
}

#[allow(clippy::cast_precision_loss)]
fn mean(a: &[f32]) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    a.iter().map(|&x| f64::from(x)).sum::<f64>() / a.len() as f64
}

fn canberra(a: &[f32], b: &[f32]) -> f64 {
    pairs(a, b)
        .map(|(x, y)| {
            let denom = x.abs() + y.abs();
            if denom == 0.0 {
                0.0
            } else {
                (x - y).abs() / denom
            }
        })
        .sum()
}

fn bray_curtis(a: &[f32], b: &[f32]) -> f64 {
    let (num, denom) = pairs(a, b).fold((0.0, 0.0), |(num, denom), (x, y)| {
        (num + (x - y).abs(), denom + (x + y).abs())
    });
    if denom == 0.0 {
        0.0
    } else {
        num / denom
    }
}

fn haversine(a: &[f32], b: &[f32]) -> f64 {
    let (lat_a, lon_a) = (f64::from(a[0]), f64::from(a[1]));
    let (lat_b, lon_b) = (f64::from(b[0]), f64::from(b[1]));
    let sin_lat = ((lat_b - lat_a) * 0.5).sin();
    let sin_lon = ((lon_b - lon_a) * 0.5).sin();
    let h = sin_lat * sin_lat + lat_a.cos() * lat_b.cos() * sin_lon * sin_lon;
    2.0 * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
#[path = "distance_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests_distance_contract.rs"]
mod tests_distance_contract;
