//! Exact brute-force k-nearest-neighbor search.
//!
//! Every query row is compared against every reference row. Rows are
//! independent, so they are processed in parallel when the `parallel`
//! feature is enabled; the output is identical either way.

use super::SelfMatch;
use crate::metrics::Metric;
use crate::primitives::Matrix;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::cmp::Ordering;

/// Flattened `(n_queries × k)` search result, row-major.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Neighborhood {
    pub(crate) n_queries: usize,
    pub(crate) k: usize,
    pub(crate) distances: Vec<f32>,
    pub(crate) indices: Vec<usize>,
}

/// Searches `reference` for the `k` nearest rows of each query row.
///
/// With [`SelfMatch::Exclude`], query row `i` is taken to be reference row
/// `i`: `k + 1` candidates are collected and the query's own index is
/// removed. If the own index did not make the cut, which can happen with
/// duplicate points, the first candidate is dropped instead. The caller
/// guarantees `1 <= k` and enough candidates.
pub(crate) fn brute_force(
    reference: &Matrix<f32>,
    queries: &Matrix<f32>,
    k: usize,
    metric: Metric,
    self_match: SelfMatch,
) -> Neighborhood {
    let search_row = |i: usize| nearest_row(reference, queries.row(i), i, k, metric, self_match);

    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<(f64, usize)>> = (0..queries.n_rows())
        .into_par_iter()
        .map(search_row)
        .collect();

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<(f64, usize)>> = (0..queries.n_rows()).map(search_row).collect();

    let mut distances = Vec::with_capacity(rows.len() * k);
    let mut indices = Vec::with_capacity(rows.len() * k);
    for row in &rows {
        for &(d, j) in row {
            #[allow(clippy::cast_possible_truncation)]
            distances.push(d as f32);
            indices.push(j);
        }
    }

    Neighborhood {
        n_queries: rows.len(),
        k,
        distances,
        indices,
    }
}

fn nearest_row(
    reference: &Matrix<f32>,
    query: &[f32],
    query_idx: usize,
    k: usize,
    metric: Metric,
    self_match: SelfMatch,
) -> Vec<(f64, usize)> {
    match self_match {
        SelfMatch::Include => k_smallest(reference, query, k, metric),
        SelfMatch::Exclude => {
            let mut row = k_smallest(reference, query, k + 1, metric);
            match row.iter().position(|&(_, j)| j == query_idx) {
                Some(pos) => {
                    row.remove(pos);
                }
                None => {
                    row.remove(0);
                }
            }
            row
        }
    }
}

/// The `k` smallest `(distance, index)` pairs, sorted ascending.
fn k_smallest(reference: &Matrix<f32>, query: &[f32], k: usize, metric: Metric) -> Vec<(f64, usize)> {
    if k == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<(f64, usize)> = reference
        .rows()
        .enumerate()
        .map(|(j, point)| (metric.distance(query, point), j))
        .collect();

    if k < candidates.len() {
        candidates.select_nth_unstable_by(k - 1, by_distance_then_index);
        candidates.truncate(k);
    }
    candidates.sort_unstable_by(by_distance_then_index);
    candidates
}

// Total order: ascending distance, NaN last, ties by ascending index.
fn by_distance_then_index(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    let by_distance = match (a.0.is_nan(), b.0.is_nan()) {
        (false, false) => a.0.total_cmp(&b.0),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    };
    by_distance.then(a.1.cmp(&b.1))
}
