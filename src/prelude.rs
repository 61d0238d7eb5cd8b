//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use kneighbors::prelude::*;
//! ```

pub use crate::datasets::make_blobs;
pub use crate::error::{NeighborsError, Result};
pub use crate::metrics::{Metric, VALID_METRICS};
pub use crate::neighbors::{
    kneighbors_graph, GraphMode, KNeighbors, NearestNeighbors, NeighborsConfig, SelfMatch,
};
pub use crate::primitives::{DType, Element, Matrix};
pub use crate::sparse::CsrMatrix;
pub use crate::traits::KNeighborsQuery;
