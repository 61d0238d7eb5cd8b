pub(crate) use super::*;

const A: [f32; 3] = [1.0, 2.0, 3.0];
const B: [f32; 3] = [4.0, 0.0, 3.0];

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_every_valid_name_parses() {
    for name in VALID_METRICS {
        let metric = Metric::from_name(name, Some(3.0))
            .unwrap_or_else(|e| panic!("{name} should parse: {e}"));
        assert!(!metric.name().is_empty());
    }
}

#[test]
fn test_aliases_resolve_to_same_metric() {
    assert_eq!(Metric::from_str("l2").expect("alias"), Metric::Euclidean);
    assert_eq!(Metric::from_str("cityblock").expect("alias"), Metric::Manhattan);
    assert_eq!(Metric::from_str("taxicab").expect("alias"), Metric::Manhattan);
    assert_eq!(Metric::from_str("linf").expect("alias"), Metric::Chebyshev);
    assert_eq!(Metric::from_str("EUCLIDEAN").expect("case"), Metric::Euclidean);
}

#[test]
fn test_unknown_metric_rejected() {
    let err = Metric::from_str("mahalanobis").unwrap_err();
    assert!(matches!(err, NeighborsError::UnsupportedMetric { .. }));
}

#[test]
fn test_minkowski_p_validation() {
    assert!(Metric::from_name("minkowski", Some(0.5)).is_err());
    assert!(Metric::from_name("minkowski", Some(f64::NAN)).is_err());
    assert!(Metric::from_name("minkowski", Some(1.0)).is_ok());
    assert_eq!(
        Metric::from_name("minkowski", None).expect("defaults to p=2"),
        Metric::Minkowski { p: 2.0 }
    );
}

#[test]
fn test_p_ignored_for_unparameterized_metrics() {
    assert_eq!(
        Metric::from_name("euclidean", Some(5.0)).expect("p ignored"),
        Metric::Euclidean
    );
}

#[test]
fn test_minkowski_family() {
    assert!(close(Metric::Euclidean.distance(&A, &B), 13.0_f64.sqrt()));
    assert!(close(Metric::SqEuclidean.distance(&A, &B), 13.0));
    assert!(close(Metric::Manhattan.distance(&A, &B), 5.0));
    assert!(close(Metric::Chebyshev.distance(&A, &B), 3.0));
    assert!(close(
        Metric::Minkowski { p: 5.0 }.distance(&A, &B),
        (243.0_f64 + 32.0).powf(0.2)
    ));
}

#[test]
fn test_minkowski_special_exponents_match_named_metrics() {
    let d1 = Metric::Minkowski { p: 1.0 }.distance(&A, &B);
    let d2 = Metric::Minkowski { p: 2.0 }.distance(&A, &B);
    let dinf = Metric::Minkowski { p: f64::INFINITY }.distance(&A, &B);
    assert!(close(d1, Metric::Manhattan.distance(&A, &B)));
    assert!(close(d2, Metric::Euclidean.distance(&A, &B)));
    assert!(close(dinf, Metric::Chebyshev.distance(&A, &B)));
}

#[test]
fn test_cosine() {
    let d = Metric::Cosine.distance(&[1.0, 0.0], &[0.0, 1.0]);
    assert!(close(d, 1.0));
    let same = Metric::Cosine.distance(&[2.0, 2.0], &[1.0, 1.0]);
    assert!(same.abs() < 1e-12);
    let opposite = Metric::Cosine.distance(&[1.0, 0.0], &[-1.0, 0.0]);
    assert!(close(opposite, 2.0));
    let zero = Metric::Cosine.distance(&[0.0, 0.0], &[1.0, 0.0]);
    assert!(close(zero, 1.0));
}

#[test]
fn test_correlation() {
    // Perfectly correlated after centring
    let d = Metric::Correlation.distance(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]);
    assert!(d.abs() < 1e-12);
    // Perfectly anti-correlated
    let d = Metric::Correlation.distance(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]);
    assert!(close(d, 2.0));
}

#[test]
fn test_canberra_skips_zero_denominators() {
    let d = Metric::Canberra.distance(&[0.0, 1.0], &[0.0, 3.0]);
    assert!(close(d, 0.5));
}

#[test]
fn test_bray_curtis() {
    let d = Metric::BrayCurtis.distance(&A, &B);
    assert!(close(d, 5.0 / 13.0));
    assert!(close(Metric::BrayCurtis.distance(&[0.0], &[0.0]), 0.0));
}

#[test]
fn test_haversine_quarter_circle() {
    let half_pi = std::f32::consts::FRAC_PI_2;
    let d = Metric::Haversine.distance(&[0.0, 0.0], &[0.0, half_pi]);
    assert!((d - std::f64::consts::FRAC_PI_2).abs() < 1e-6);
    let pole = Metric::Haversine.distance(&[half_pi, 0.0], &[0.0, 0.0]);
    assert!((pole - std::f64::consts::FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn test_haversine_requires_two_features() {
    assert!(Metric::Haversine.validate_features(2).is_ok());
    assert!(Metric::Haversine.validate_features(3).is_err());
    assert!(Metric::Euclidean.validate_features(3).is_ok());
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn test_haversine_panics_on_one_coordinate() {
    let _ = Metric::Haversine.distance(&[0.5], &[0.25]);
}

#[test]
fn test_distances_are_non_negative() {
    let x = [0.3_f32, -1.7, 2.2];
    for name in VALID_METRICS.iter().filter(|n| **n != "haversine") {
        let metric = Metric::from_name(name, Some(3.0)).expect("valid");
        let d = metric.distance(&x, &x);
        assert!(d >= 0.0 && d.is_sign_positive(), "{name}: {d}");
        assert!(d < 1e-6, "{name}: self distance {d}");
    }
}

#[test]
fn test_display() {
    assert_eq!(Metric::Euclidean.to_string(), "euclidean");
    assert_eq!(Metric::Minkowski { p: 5.0 }.to_string(), "minkowski(p=5)");
}

#[test]
fn test_default_is_minkowski_two() {
    assert_eq!(Metric::default(), Metric::Minkowski { p: 2.0 });
}
