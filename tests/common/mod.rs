//! Shared helpers for the integration suites: a plain f64 brute-force
//! oracle written independently of the library's metric code.

#![allow(dead_code)]

use kneighbors::prelude::*;

/// Rows of `m` after the same `f64 -> f32` rounding `fit` applies.
pub fn rounded_rows(m: &Matrix<f64>) -> Vec<Vec<f64>> {
    m.rows()
        .map(|row| row.iter().map(|&v| f64::from(v as f32)).collect())
        .collect()
}

/// Reference distance for `metric`.
pub fn oracle_distance(metric: Metric, a: &[f64], b: &[f64]) -> f64 {
    let diffs = || a.iter().zip(b).map(|(x, y)| (x - y).abs());
    match metric {
        Metric::Euclidean => diffs().map(|d| d * d).sum::<f64>().sqrt(),
        Metric::SqEuclidean => diffs().map(|d| d * d).sum(),
        Metric::Manhattan => diffs().sum(),
        Metric::Chebyshev => diffs().fold(0.0, f64::max),
        Metric::Minkowski { p } if p.is_infinite() => diffs().fold(0.0, f64::max),
        Metric::Minkowski { p } => diffs().map(|d| d.powf(p)).sum::<f64>().powf(1.0 / p),
        Metric::Cosine => 1.0 - dot(a, b) / (dot(a, a).sqrt() * dot(b, b).sqrt()),
        Metric::Correlation => {
            let ca = centred(a);
            let cb = centred(b);
            1.0 - dot(&ca, &cb) / (dot(&ca, &ca).sqrt() * dot(&cb, &cb).sqrt())
        }
        Metric::Canberra => a
            .iter()
            .zip(b)
            .map(|(x, y)| {
                let denom = x.abs() + y.abs();
                if denom > 0.0 {
                    (x - y).abs() / denom
                } else {
                    0.0
                }
            })
            .sum(),
        Metric::BrayCurtis => {
            let num: f64 = diffs().sum();
            let denom: f64 = a.iter().zip(b).map(|(x, y)| (x + y).abs()).sum();
            num / denom
        }
        Metric::Haversine => {
            let h = ((b[0] - a[0]) / 2.0).sin().powi(2)
                + a[0].cos() * b[0].cos() * ((b[1] - a[1]) / 2.0).sin().powi(2);
            2.0 * h.sqrt().asin()
        }
    }
    .max(0.0)
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn centred(a: &[f64]) -> Vec<f64> {
    let mean = a.iter().sum::<f64>() / a.len() as f64;
    a.iter().map(|x| x - mean).collect()
}

/// The `k` smallest oracle distances of every query, ascending.
pub fn oracle_kneighbors(
    fit: &[Vec<f64>],
    queries: &[Vec<f64>],
    k: usize,
    metric: Metric,
) -> Vec<Vec<f64>> {
    queries
        .iter()
        .map(|q| {
            let mut d: Vec<f64> = fit.iter().map(|p| oracle_distance(metric, q, p)).collect();
            d.sort_by(f64::total_cmp);
            d.truncate(k);
            d
        })
        .collect()
}

/// `|a - b| <= atol + rtol * |b|`
pub fn close(a: f64, b: f64, atol: f64, rtol: f64) -> bool {
    (a - b).abs() <= atol + rtol * b.abs()
}
