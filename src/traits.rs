//! Core traits for neighbor-query estimators.
//!
//! A type that can answer k-nearest-neighbor queries gets neighbor-graph
//! construction for free: the graph methods are default methods layered on
//! top of `kneighbors` and `kneighbors_fitted`.

use crate::error::Result;
use crate::neighbors::{GraphMode, KNeighbors, SelfMatch};
use crate::primitives::{Element, Matrix};
use crate::sparse::CsrMatrix;

/// Query contract of a fitted k-nearest-neighbor index.
///
/// # Examples
///
/// ```
/// use kneighbors::prelude::*;
///
/// let x = Matrix::from_rows(&[[0.0_f32, 1.0], [1.01, 1.0], [2.0, 0.0]]).unwrap();
///
/// let mut nn = NearestNeighbors::new().with_n_neighbors(2);
/// nn.fit(&x, false).unwrap();
///
/// let graph = nn.kneighbors_graph(&x, None, GraphMode::Connectivity).unwrap();
/// assert_eq!(graph.shape(), (3, 3));
/// assert_eq!(graph.nnz(), 6);
/// ```
pub trait KNeighborsQuery {
    /// Number of points in the fitted set.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is not fitted.
    fn n_samples_fit(&self) -> Result<usize>;

    /// Finds the `n_neighbors` nearest fitted points of every row of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is not fitted, `x` has the wrong number
    /// of features or cannot be converted, or `n_neighbors` is out of range.
    fn kneighbors<T: Element>(
        &self,
        x: &Matrix<T>,
        n_neighbors: Option<usize>,
        return_distance: bool,
    ) -> Result<KNeighbors>;

    /// Finds the nearest fitted points of every fitted point.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is not fitted or `n_neighbors` exceeds
    /// the available candidates.
    fn kneighbors_fitted(
        &self,
        n_neighbors: Option<usize>,
        self_match: SelfMatch,
        return_distance: bool,
    ) -> Result<KNeighbors>;

    /// Builds the `(n_queries × n_samples_fit)` k-neighbor graph of `x`.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`KNeighborsQuery::kneighbors`].
    fn kneighbors_graph<T: Element>(
        &self,
        x: &Matrix<T>,
        n_neighbors: Option<usize>,
        mode: GraphMode,
    ) -> Result<CsrMatrix> {
        let n_cols = self.n_samples_fit()?;
        self.kneighbors(x, n_neighbors, mode.needs_distances())?
            .to_graph(n_cols, mode)
    }

    /// Builds the square k-neighbor graph of the fitted set.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`KNeighborsQuery::kneighbors_fitted`].
    fn kneighbors_graph_fitted(
        &self,
        n_neighbors: Option<usize>,
        mode: GraphMode,
        self_match: SelfMatch,
    ) -> Result<CsrMatrix> {
        let n_cols = self.n_samples_fit()?;
        self.kneighbors_fitted(n_neighbors, self_match, mode.needs_distances())?
            .to_graph(n_cols, mode)
    }
}
