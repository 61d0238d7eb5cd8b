//! Distance metrics for neighbor search.
//!
//! Includes the Minkowski family (euclidean, manhattan, chebyshev and
//! arbitrary `p`), angular metrics (cosine, correlation), the weighted L1
//! variants (canberra, Bray-Curtis) and the great-circle haversine distance.

pub mod distance;

pub use distance::{Metric, VALID_METRICS};
