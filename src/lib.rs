//! kneighbors: exact k-nearest-neighbor search in pure Rust.
//!
//! Fit a point set once, then ask for the nearest fitted points of any
//! query set, with or without distances, or lay the result out as a sparse
//! neighbor graph. Points are stored as `f32`; other element types are
//! converted on request.
//!
//! # Quick Start
//!
//! ```
//! use kneighbors::prelude::*;
//!
//! let x = Matrix::from_rows(&[[0.0_f64, 1.0], [1.01, 1.0], [2.0, 0.0]]).unwrap();
//!
//! let mut nn = NearestNeighbors::new().with_n_neighbors(2);
//! nn.fit(&x, true).unwrap();
//!
//! let result = nn.kneighbors(&x, None, true).unwrap();
//! assert_eq!(result.indices().row(0), &[0, 1]);
//!
//! let graph = nn
//!     .kneighbors_graph_fitted(None, GraphMode::Distance, SelfMatch::Exclude)
//!     .unwrap();
//! assert_eq!(graph.shape(), (3, 3));
//! assert_eq!(graph.get(0, 0), 0.0);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Row-major `Matrix` and element-type conversion
//! - [`metrics`]: Distance metrics (Minkowski family, cosine, haversine, ...)
//! - [`neighbors`]: The `NearestNeighbors` estimator and graph construction
//! - [`sparse`]: CSR matrices returned by graph queries
//! - [`datasets`]: Synthetic Gaussian blobs
//! - [`traits`]: The `KNeighborsQuery` contract

pub mod datasets;
pub mod error;
pub mod metrics;
pub mod neighbors;
pub mod prelude;
pub mod primitives;
pub mod sparse;
pub mod traits;

pub use error::{NeighborsError, Result};
pub use neighbors::{kneighbors_graph, GraphMode, KNeighbors, NearestNeighbors, SelfMatch};
pub use primitives::Matrix;
pub use traits::KNeighborsQuery;
