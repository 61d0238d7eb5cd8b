// =========================================================================
// FALSIFY-DM: distance metric contract
//
// Five-Whys:
//   Why 1: every neighbor query ranks points by these functions
//   Why 2: a negative or asymmetric distance reorders neighbor lists
//   Why 3: f32 storage with f64 accumulation hides rounding at the edges
//   Why 4: special-cased exponents (p = 1, 2, inf) can drift from the general path
//   Why 5: metric code is "just arithmetic" and rarely re-verified
//
// References:
//   - Deza & Deza (2009) "Encyclopedia of Distances"
// =========================================================================

use super::*;

const TRUE_METRICS: [Metric; 6] = [
    Metric::Euclidean,
    Metric::Manhattan,
    Metric::Chebyshev,
    Metric::Minkowski { p: 3.0 },
    Metric::Canberra,
    Metric::Haversine,
];

fn point(seed: u32, dim: usize) -> Vec<f32> {
    (0..dim)
        .map(|i| ((i as f32 + seed as f32) * 0.37).sin() * 1.4)
        .collect()
}

/// FALSIFY-DM-001: Identity of indiscernibles, d(x, x) = 0
#[test]
fn falsify_dm_001_self_distance_zero() {
    let x = point(3, 2);
    for metric in TRUE_METRICS.iter().chain(&[Metric::SqEuclidean, Metric::BrayCurtis]) {
        assert_eq!(
            metric.distance(&x, &x),
            0.0,
            "FALSIFIED DM-001: d(x, x) != 0 under {metric}"
        );
    }
}

/// FALSIFY-DM-002: Symmetry, d(x, y) = d(y, x)
#[test]
fn falsify_dm_002_symmetry() {
    let (x, y) = (point(1, 2), point(9, 2));
    for metric in TRUE_METRICS {
        let (xy, yx) = (metric.distance(&x, &y), metric.distance(&y, &x));
        assert!(
            (xy - yx).abs() < 1e-12,
            "FALSIFIED DM-002: {metric} gives {xy} vs {yx}"
        );
    }
}

/// FALSIFY-DM-003: p = 1, 2 and inf agree with their named metrics
#[test]
fn falsify_dm_003_minkowski_special_cases() {
    let (x, y) = (point(2, 7), point(5, 7));
    let pairs = [
        (1.0, Metric::Manhattan),
        (2.0, Metric::Euclidean),
        (f64::INFINITY, Metric::Chebyshev),
    ];
    for (p, named) in pairs {
        let general = Metric::Minkowski { p }.distance(&x, &y);
        assert!(
            (general - named.distance(&x, &y)).abs() < 1e-12,
            "FALSIFIED DM-003: minkowski(p={p}) != {named}"
        );
    }
}

/// FALSIFY-DM-004: Minkowski distance is non-increasing in p
#[test]
fn falsify_dm_004_minkowski_monotone_in_p() {
    let (x, y) = (point(4, 6), point(11, 6));
    let ps = [1.0, 1.5, 2.0, 3.0, 8.0, f64::INFINITY];
    let d: Vec<f64> = ps
        .iter()
        .map(|&p| Metric::Minkowski { p }.distance(&x, &y))
        .collect();
    assert!(
        d.windows(2).all(|w| w[0] >= w[1] - 1e-12),
        "FALSIFIED DM-004: {d:?}"
    );
}

/// FALSIFY-DM-005: Cosine distance ignores positive scaling
#[test]
fn falsify_dm_005_cosine_scale_invariant() {
    let x = point(6, 5);
    let y = point(13, 5);
    let scaled: Vec<f32> = y.iter().map(|v| v * 4.0).collect();
    let (a, b) = (Metric::Cosine.distance(&x, &y), Metric::Cosine.distance(&x, &scaled));
    assert!((a - b).abs() < 1e-6, "FALSIFIED DM-005: {a} vs {b}");
}

mod distance_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    /// FALSIFY-DM-006-prop: Triangle inequality for the true metrics
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn falsify_dm_006_prop_triangle_inequality(
            a in 0..500u32,
            b in 0..500u32,
            c in 0..500u32,
        ) {
            let (x, y, z) = (point(a, 2), point(b, 2), point(c, 2));
            for metric in TRUE_METRICS {
                let direct = metric.distance(&x, &z);
                let detour = metric.distance(&x, &y) + metric.distance(&y, &z);
                prop_assert!(
                    direct <= detour + 1e-9,
                    "FALSIFIED DM-006-prop: {} violates triangle inequality",
                    metric
                );
            }
        }
    }

    /// FALSIFY-DM-007-prop: Distances are never negative
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn falsify_dm_007_prop_non_negative(
            x in proptest::collection::vec(-50.0f32..50.0, 4),
            y in proptest::collection::vec(-50.0f32..50.0, 4),
        ) {
            for metric in [
                Metric::SqEuclidean,
                Metric::Cosine,
                Metric::Correlation,
                Metric::BrayCurtis,
                Metric::Minkowski { p: 1.7 },
            ] {
                prop_assert!(metric.distance(&x, &y) >= 0.0, "FALSIFIED DM-007-prop: {}", metric);
            }
        }
    }
}
