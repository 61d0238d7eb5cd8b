// =========================================================================
// FALSIFY-NN: nearest-neighbor query contract
//
// Five-Whys:
//   Why 1: neighbor indices feed graphs, clustering and label votes downstream
//   Why 2: an off-by-one or unsorted row silently corrupts all of them
//   Why 3: brute force is "obviously correct", so nobody re-checks it
//   Why 4: self-match handling and tie order differ between libraries
//   Why 5: graph construction inherits every bug of the query it wraps
//
// References:
//   - Cover & Hart (1967) "Nearest neighbor pattern classification"
// =========================================================================

use super::*;

fn grid() -> Matrix<f32> {
    // 4x4 integer lattice, row-major
    let data = (0..16)
        .flat_map(|i| [(i % 4) as f32, (i / 4) as f32])
        .collect();
    Matrix::from_vec(16, 2, data).expect("16x2")
}

fn fitted(metric: Metric, k: usize) -> NearestNeighbors {
    let mut nn = NearestNeighbors::new()
        .with_n_neighbors(k)
        .with_metric(metric);
    nn.fit(&grid(), false).expect("valid f32 input");
    nn
}

/// FALSIFY-NN-001: Output shape is (n_queries, k) for both result matrices
#[test]
fn falsify_nn_001_output_shape() {
    let nn = fitted(Metric::Euclidean, 4);
    let q = Matrix::from_vec(3, 2, vec![0.5_f32, 0.5, 2.2, 3.1, -1.0, 9.0]).expect("3x2");
    let result = nn.kneighbors(&q, None, true).expect("query");

    assert_eq!(result.shape(), (3, 4), "FALSIFIED NN-001: index shape");
    assert_eq!(
        result.distances().map(Matrix::shape),
        Some((3, 4)),
        "FALSIFIED NN-001: distance shape"
    );
}

/// FALSIFY-NN-002: Distances are non-decreasing along every row
#[test]
fn falsify_nn_002_rows_sorted() {
    for metric in [Metric::Euclidean, Metric::Manhattan, Metric::Chebyshev, Metric::Cosine] {
        let nn = fitted(metric, 7);
        let result = nn.kneighbors_fitted(None, SelfMatch::Include, true).expect("query");
        let d = result.distances().expect("requested");
        for (i, row) in d.rows().enumerate() {
            assert!(
                row.windows(2).all(|w| w[0] <= w[1]),
                "FALSIFIED NN-002: row {i} unsorted under {metric}: {row:?}"
            );
        }
    }
}

/// FALSIFY-NN-003: A fitted point is its own nearest neighbor at distance 0
#[test]
fn falsify_nn_003_self_is_nearest() {
    let nn = fitted(Metric::Euclidean, 1);
    let result = nn.kneighbors(&grid(), None, true).expect("query");
    for i in 0..16 {
        assert_eq!(result.indices().get(i, 0), i, "FALSIFIED NN-003: row {i}");
        assert_eq!(
            result.distances().expect("requested").get(i, 0),
            0.0,
            "FALSIFIED NN-003: self distance of row {i}"
        );
    }
}

/// FALSIFY-NN-004: Excluding self never returns the query's own index
#[test]
fn falsify_nn_004_exclude_self() {
    let nn = fitted(Metric::Manhattan, 5);
    let result = nn.kneighbors_fitted(None, SelfMatch::Exclude, false).expect("query");
    for (i, row) in result.indices().rows().enumerate() {
        assert!(!row.contains(&i), "FALSIFIED NN-004: row {i} contains itself");
    }
}

/// FALSIFY-NN-005: Neighbor indices in a row are distinct and in range
#[test]
fn falsify_nn_005_indices_distinct_in_range() {
    let nn = fitted(Metric::Chebyshev, 16);
    let result = nn.kneighbors_fitted(None, SelfMatch::Include, false).expect("query");
    for (i, row) in result.indices().rows().enumerate() {
        let mut sorted = row.to_vec();
        sorted.sort_unstable();
        assert_eq!(
            sorted,
            (0..16).collect::<Vec<_>>(),
            "FALSIFIED NN-005: row {i} is not a permutation"
        );
    }
}

/// FALSIFY-NN-006: Equal distances are ordered by ascending fitted index
#[test]
fn falsify_nn_006_ties_by_index() {
    let nn = fitted(Metric::Manhattan, 5);
    // Center-ish point (1,1) = index 5 has four neighbors at distance 1
    let q = Matrix::from_vec(1, 2, vec![1.0_f32, 1.0]).expect("1x2");
    let result = nn.kneighbors(&q, None, false).expect("query");
    assert_eq!(
        result.indices().row(0),
        &[5, 1, 4, 6, 9],
        "FALSIFIED NN-006: tie order"
    );
}

/// FALSIFY-NN-007: Connectivity graph has exactly k ones per row
#[test]
fn falsify_nn_007_connectivity_row_sums() {
    let nn = fitted(Metric::Euclidean, 3);
    let graph = nn
        .kneighbors_graph_fitted(None, GraphMode::Connectivity, SelfMatch::Exclude)
        .expect("graph");
    let dense = graph.to_dense();
    for (i, row) in dense.rows().enumerate() {
        let total: f32 = row.iter().sum();
        assert_eq!(total, 3.0, "FALSIFIED NN-007: row {i} sums to {total}");
        assert_eq!(row[i], 0.0, "FALSIFIED NN-007: self loop in row {i}");
    }
}

/// FALSIFY-NN-008: Distance graph entries equal the query distances
#[test]
fn falsify_nn_008_distance_graph_matches_query() {
    let nn = fitted(Metric::Minkowski { p: 3.0 }, 4);
    let q = Matrix::from_vec(2, 2, vec![0.3_f32, 2.7, 3.5, -0.5]).expect("2x2");
    let graph = nn.kneighbors_graph(&q, None, GraphMode::Distance).expect("graph");
    let result = nn.kneighbors(&q, None, true).expect("query");
    let d = result.distances().expect("requested");

    for i in 0..2 {
        for (slot, &j) in result.indices().row(i).iter().enumerate() {
            assert_eq!(
                graph.get(i, j),
                d.get(i, slot),
                "FALSIFIED NN-008: graph[{i},{j}] differs from query distance"
            );
        }
    }
}

/// FALSIFY-NN-009: Querying an unfitted estimator fails with NotFitted
#[test]
fn falsify_nn_009_not_fitted() {
    let nn = NearestNeighbors::new();
    let err = nn
        .kneighbors_graph(&grid(), Some(1), GraphMode::Connectivity)
        .unwrap_err();
    assert!(
        matches!(err, NeighborsError::NotFitted { .. }),
        "FALSIFIED NN-009: got {err}"
    );
}

/// FALSIFY-NN-010: f64 input is rejected unless conversion is allowed
#[test]
fn falsify_nn_010_convert_dtype_gate() {
    let x: Matrix<f64> = convert::from_f32(&grid());
    let mut nn = NearestNeighbors::new();
    let err = nn.fit(&x, false).unwrap_err();
    assert!(
        matches!(err, NeighborsError::DataConversion { .. }),
        "FALSIFIED NN-010: got {err}"
    );
    nn.fit(&x, true).expect("FALSIFIED NN-010: conversion allowed");
    assert_eq!(nn.fitted_data().expect("fitted"), &grid());
}
