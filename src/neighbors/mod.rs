//! Unsupervised nearest-neighbor search.
//!
//! [`NearestNeighbors`] stores a point set and answers exact k-nearest-neighbor
//! queries by brute force under any [`Metric`]. Query results come back as
//! [`KNeighbors`]; neighbor graphs come back as [`CsrMatrix`].
//!
//! # Example
//!
//! ```
//! use kneighbors::prelude::*;
//!
//! let x = Matrix::from_rows(&[[0.0_f64, 1.0], [1.01, 1.0], [2.0, 0.0]])
//!     .expect("rows have equal length");
//!
//! let mut nn = NearestNeighbors::new().with_n_neighbors(2);
//! nn.fit(&x, true).expect("values fit in f32");
//!
//! let result = nn.kneighbors(&x, None, true).expect("fitted");
//! assert_eq!(result.indices().row(2), &[2, 1]);
//! let distances = result.distances().expect("requested");
//! assert!((distances.get(0, 1) - 1.01).abs() < 1e-6);
//! ```

mod search;

use crate::error::{NeighborsError, Result};
use crate::metrics::Metric;
use crate::primitives::convert;
use crate::primitives::{DType, Element, Matrix};
use crate::sparse::CsrMatrix;
use crate::traits::KNeighborsQuery;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

const ESTIMATOR: &str = "NearestNeighbors";

/// Whether a point queried against its own fitted set may be its own neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfMatch {
    /// Keep the zero-distance self match; it occupies one of the k slots.
    #[default]
    Include,
    /// Drop the self match and return the k nearest *other* points.
    Exclude,
}

/// What a neighbor-graph entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphMode {
    /// `1.0` for every neighbor.
    #[default]
    Connectivity,
    /// The distance to every neighbor.
    Distance,
}

impl GraphMode {
    /// Canonical name of the mode.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Connectivity => "connectivity",
            Self::Distance => "distance",
        }
    }

    pub(crate) fn needs_distances(self) -> bool {
        matches!(self, Self::Distance)
    }
}

impl fmt::Display for GraphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GraphMode {
    type Err = NeighborsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "connectivity" => Ok(Self::Connectivity),
            "distance" => Ok(Self::Distance),
            other => Err(NeighborsError::invalid_hyperparameter(
                "mode",
                other,
                "'connectivity' or 'distance'",
            )),
        }
    }
}

/// Result of a k-nearest-neighbor query.
///
/// Both matrices are `(n_queries × k)`; row `i` lists the neighbors of query
/// `i` by ascending distance, ties broken by ascending fitted index.
#[derive(Debug, Clone, PartialEq)]
pub enum KNeighbors {
    /// Neighbor indices only (`return_distance = false`).
    Indices(Matrix<usize>),
    /// Distances and indices (`return_distance = true`).
    WithDistances {
        /// Distance to each neighbor
        distances: Matrix<f32>,
        /// Fitted-set index of each neighbor
        indices: Matrix<usize>,
    },
}

impl KNeighbors {
    /// Neighbor indices.
    #[must_use]
    pub fn indices(&self) -> &Matrix<usize> {
        match self {
            Self::Indices(indices) | Self::WithDistances { indices, .. } => indices,
        }
    }

    /// Neighbor distances, if they were requested.
    #[must_use]
    pub fn distances(&self) -> Option<&Matrix<f32>> {
        match self {
            Self::Indices(_) => None,
            Self::WithDistances { distances, .. } => Some(distances),
        }
    }

    /// Shape `(n_queries, k)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.indices().shape()
    }

    /// Splits into `(distances, indices)`.
    #[must_use]
    pub fn into_parts(self) -> (Option<Matrix<f32>>, Matrix<usize>) {
        match self {
            Self::Indices(indices) => (None, indices),
            Self::WithDistances { distances, indices } => (Some(distances), indices),
        }
    }

    /// Lays the neighbors out as a `(n_queries × n_cols)` sparse graph.
    ///
    /// # Errors
    ///
    /// Returns an error if `mode` is [`GraphMode::Distance`] but no distances
    /// were computed, or if an index does not fit in `n_cols`.
    pub fn to_graph(self, n_cols: usize, mode: GraphMode) -> Result<CsrMatrix> {
        let (_, k) = self.shape();
        let (distances, indices) = self.into_parts();
        let indices = indices.into_vec();
        let data = match (mode, distances) {
            (GraphMode::Connectivity, _) => vec![1.0; indices.len()],
            (GraphMode::Distance, Some(distances)) => distances.into_vec(),
            (GraphMode::Distance, None) => {
                return Err(NeighborsError::InvalidInput {
                    message: "distance graph requires neighbor distances".to_string(),
                })
            }
        };
        trace!(n_entries = indices.len(), k, n_cols, mode = %mode, "assembling neighbor graph");
        CsrMatrix::from_uniform_rows(n_cols, k, indices, data)
    }
}

/// Hyperparameters of a [`NearestNeighbors`] estimator.
///
/// # Examples
///
/// ```
/// use kneighbors::neighbors::{NearestNeighbors, NeighborsConfig};
/// use kneighbors::metrics::Metric;
///
/// let config = NeighborsConfig { n_neighbors: 3, metric: Metric::Cosine };
/// let nn = NearestNeighbors::from_config(config).expect("valid config");
/// assert_eq!(nn.n_neighbors(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborsConfig {
    /// Default number of neighbors per query
    pub n_neighbors: usize,
    /// Distance metric
    pub metric: Metric,
}

impl Default for NeighborsConfig {
    fn default() -> Self {
        Self {
            n_neighbors: 5,
            metric: Metric::default(),
        }
    }
}

impl NeighborsConfig {
    /// Checks every hyperparameter.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_neighbors` is zero or the metric is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.n_neighbors == 0 {
            return Err(NeighborsError::invalid_hyperparameter(
                "n_neighbors",
                self.n_neighbors,
                ">= 1",
            ));
        }
        self.metric.validate()
    }
}

/// Fitted state: the converted point set and the dtype it came in as.
#[derive(Debug, Clone)]
struct FittedIndex {
    data: Matrix<f32>,
    dtype: DType,
}

/// Unsupervised learner for exact nearest-neighbor queries.
///
/// Fitting stores an `f32` copy of the point set; queries compare every
/// query row against every stored row. Queries take `&self` and may run
/// concurrently; `fit` takes `&mut self` and replaces the stored set.
///
/// # Example
///
/// ```
/// use kneighbors::prelude::*;
///
/// let x = Matrix::from_vec(6, 2, vec![
///     0.0_f32, 0.0,
///     0.0, 1.0,
///     1.0, 0.0,
///     5.0, 5.0,
///     5.0, 6.0,
///     6.0, 5.0,
/// ]).expect("6x2 matrix with 12 values");
///
/// let mut nn = NearestNeighbors::new().with_n_neighbors(3);
/// nn.fit(&x, false).expect("f32 input needs no conversion");
///
/// let query = Matrix::from_vec(1, 2, vec![5.2_f32, 5.2]).expect("1x2 query");
/// let result = nn.kneighbors(&query, None, false).expect("fitted");
/// let mut found = result.indices().row(0).to_vec();
/// found.sort_unstable();
/// assert_eq!(found, vec![3, 4, 5]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NearestNeighbors {
    config: NeighborsConfig,
    index: Option<FittedIndex>,
}

impl NearestNeighbors {
    /// Creates an estimator with `n_neighbors = 5` and Minkowski `p = 2`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an estimator from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: NeighborsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            index: None,
        })
    }

    /// Sets the default number of neighbors.
    #[must_use]
    pub fn with_n_neighbors(mut self, n_neighbors: usize) -> Self {
        self.config.n_neighbors = n_neighbors;
        self
    }

    /// Sets the distance metric.
    #[must_use]
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.config.metric = metric;
        self
    }

    /// Sets the Minkowski exponent.
    ///
    /// A euclidean or Minkowski metric becomes `Minkowski { p }`; other
    /// metrics are left unchanged, so call this after
    /// [`with_metric`](Self::with_metric).
    #[must_use]
    pub fn with_p(mut self, p: f64) -> Self {
        if let Metric::Euclidean | Metric::Minkowski { .. } = self.config.metric {
            self.config.metric = Metric::Minkowski { p };
        }
        self
    }

    /// Current hyperparameters.
    #[must_use]
    pub fn config(&self) -> &NeighborsConfig {
        &self.config
    }

    /// Default number of neighbors per query.
    #[must_use]
    pub fn n_neighbors(&self) -> usize {
        self.config.n_neighbors
    }

    /// Distance metric.
    #[must_use]
    pub fn metric(&self) -> Metric {
        self.config.metric
    }

    /// Whether `fit` has succeeded.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.index.is_some()
    }

    /// Fits the index by storing an `f32` copy of `x`.
    ///
    /// Any previous fitted state is released first, so a failed fit leaves
    /// the estimator unfitted.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is empty, the hyperparameters are invalid,
    /// the metric is undefined for `x`'s dimension, or `x` is not `f32` and
    /// `convert_dtype` is false or its values exceed the `f32` range.
    pub fn fit<T: Element>(&mut self, x: &Matrix<T>, convert_dtype: bool) -> Result<()> {
        self.index = None;

        let (n_samples, n_features) = x.shape();
        if n_samples == 0 || n_features == 0 {
            return Err(NeighborsError::empty_input(&format!(
                "cannot fit on a {n_samples}x{n_features} matrix"
            )));
        }
        self.config.validate()?;
        self.config.metric.validate_features(n_features)?;

        let data = convert::to_f32(x, convert_dtype)?;
        let dtype = T::DTYPE;
        let metric = self.config.metric;
        debug!(
            n_samples,
            n_features,
            %dtype,
            %metric,
            "fitted nearest-neighbor index"
        );
        self.index = Some(FittedIndex { data, dtype });
        Ok(())
    }

    /// The stored `f32` point set.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is not fitted.
    pub fn fitted_data(&self) -> Result<&Matrix<f32>> {
        Ok(&self.index()?.data)
    }

    /// The stored point set converted back to `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is not fitted.
    pub fn fitted_data_as<T: Element>(&self) -> Result<Matrix<T>> {
        Ok(convert::from_f32(&self.index()?.data))
    }

    /// Element type of the data passed to `fit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is not fitted.
    pub fn fitted_dtype(&self) -> Result<DType> {
        Ok(self.index()?.dtype)
    }

    /// Number of features seen during `fit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is not fitted.
    pub fn n_features_in(&self) -> Result<usize> {
        Ok(self.index()?.data.n_cols())
    }

    fn index(&self) -> Result<&FittedIndex> {
        self.index
            .as_ref()
            .ok_or_else(|| NeighborsError::not_fitted(ESTIMATOR))
    }

    fn resolve_k(&self, n_neighbors: Option<usize>, n_candidates: usize) -> Result<usize> {
        let k = n_neighbors.unwrap_or(self.config.n_neighbors);
        if k == 0 {
            return Err(NeighborsError::invalid_hyperparameter(
                "n_neighbors",
                k,
                ">= 1",
            ));
        }
        if k > n_candidates {
            return Err(NeighborsError::invalid_hyperparameter(
                "n_neighbors",
                k,
                &format!("<= {n_candidates} available candidates"),
            ));
        }
        Ok(k)
    }

    fn collect(
        index: &FittedIndex,
        queries: &Matrix<f32>,
        k: usize,
        metric: Metric,
        self_match: SelfMatch,
        return_distance: bool,
    ) -> Result<KNeighbors> {
        let hood = search::brute_force(&index.data, queries, k, metric, self_match);
        let indices = Matrix::from_vec(hood.n_queries, hood.k, hood.indices)?;
        if !return_distance {
            return Ok(KNeighbors::Indices(indices));
        }
        let distances = Matrix::from_vec(hood.n_queries, hood.k, hood.distances)?;
        Ok(KNeighbors::WithDistances { distances, indices })
    }
}

impl KNeighborsQuery for NearestNeighbors {
    fn n_samples_fit(&self) -> Result<usize> {
        Ok(self.index()?.data.n_rows())
    }

    fn kneighbors<T: Element>(
        &self,
        x: &Matrix<T>,
        n_neighbors: Option<usize>,
        return_distance: bool,
    ) -> Result<KNeighbors> {
        let index = self.index()?;
        if x.n_cols() != index.data.n_cols() {
            return Err(NeighborsError::dimension_mismatch(
                "n_features",
                index.data.n_cols(),
                x.n_cols(),
            ));
        }
        let k = self.resolve_k(n_neighbors, index.data.n_rows())?;
        let queries = convert::to_f32(x, true)?;
        debug!(n_queries = queries.n_rows(), k, return_distance, "kneighbors query");
        Self::collect(
            index,
            &queries,
            k,
            self.config.metric,
            SelfMatch::Include,
            return_distance,
        )
    }

    fn kneighbors_fitted(
        &self,
        n_neighbors: Option<usize>,
        self_match: SelfMatch,
        return_distance: bool,
    ) -> Result<KNeighbors> {
        let index = self.index()?;
        let n_candidates = match self_match {
            SelfMatch::Include => index.data.n_rows(),
            SelfMatch::Exclude => index.data.n_rows() - 1,
        };
        let k = self.resolve_k(n_neighbors, n_candidates)?;
        debug!(
            n_queries = index.data.n_rows(),
            k,
            ?self_match,
            return_distance,
            "kneighbors query on fitted set"
        );
        Self::collect(
            index,
            &index.data,
            k,
            self.config.metric,
            self_match,
            return_distance,
        )
    }
}

/// Computes the k-neighbor graph of `x` in one call.
///
/// Fits a temporary [`NearestNeighbors`] on `x` (converting to `f32` when
/// needed) and returns its square `(n × n)` graph.
///
/// `include_self` has no effect on the result: both values query the fitted
/// set and keep each point's zero-distance self match in one of the
/// `n_neighbors` slots. Use [`KNeighborsQuery::kneighbors_graph_fitted`]
/// with [`SelfMatch::Exclude`] to get a graph without self loops.
///
/// # Errors
///
/// Returns an error if `x` cannot be fitted or `n_neighbors` is out of range.
///
/// # Examples
///
/// ```
/// use kneighbors::neighbors::{kneighbors_graph, GraphMode};
/// use kneighbors::metrics::Metric;
/// use kneighbors::primitives::Matrix;
///
/// let x = Matrix::from_rows(&[[0.0_f64, 1.0], [1.01, 1.0], [2.0, 0.0]]).expect("3x2");
/// let graph = kneighbors_graph(&x, 2, GraphMode::Connectivity, true, Metric::Euclidean)
///     .expect("valid input");
/// assert_eq!(
///     graph.to_dense().as_slice(),
///     &[1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0]
/// );
/// ```
pub fn kneighbors_graph<T: Element>(
    x: &Matrix<T>,
    n_neighbors: usize,
    mode: GraphMode,
    include_self: bool,
    metric: Metric,
) -> Result<CsrMatrix> {
    let mut nn = NearestNeighbors::new()
        .with_n_neighbors(n_neighbors)
        .with_metric(metric);
    nn.fit(x, true)?;
    if include_self {
        nn.kneighbors_graph(x, None, mode)
    } else {
        nn.kneighbors_graph_fitted(None, mode, SelfMatch::Include)
    }
}


#[cfg(test)]
#[path = "tests_knn_contract.rs"]
mod tests_knn_contract;
