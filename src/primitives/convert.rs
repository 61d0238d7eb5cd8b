//! Precision conversion into the `f32` storage format.
//!
//! `f32` input passes through untouched. Anything else needs the caller's
//! permission (`convert_dtype`) and must fit the `f32` range; NaN is carried
//! through since it has no magnitude to lose.

use super::{DType, Element, Matrix};
use crate::error::{NeighborsError, Result};

/// Converts `x` to the `f32` storage format.
///
/// # Errors
///
/// Returns [`NeighborsError::DataConversion`] when `x` is not `f32` and
/// `convert_dtype` is false, or when a value lies outside the finite `f32`
/// range.
///
/// # Examples
///
/// ```
/// use kneighbors::primitives::{convert::to_f32, Matrix};
///
/// let x = Matrix::from_vec(1, 2, vec![1.5_f64, -2.0]).expect("1x2");
/// assert!(to_f32(&x, false).is_err());
/// let stored = to_f32(&x, true).expect("values fit in f32");
/// assert_eq!(stored.as_slice(), &[1.5_f32, -2.0]);
/// ```
pub fn to_f32<T: Element>(x: &Matrix<T>, convert_dtype: bool) -> Result<Matrix<f32>> {
    if T::DTYPE == DType::Float32 {
        return Ok(x.map(narrow));
    }

    if !convert_dtype {
        return Err(conversion_error(
            T::DTYPE,
            "input requires conversion but convert_dtype is disabled".to_string(),
        ));
    }

    let min = f64::from(f32::MIN);
    let max = f64::from(f32::MAX);
    if let Some(bad) = x
        .as_slice()
        .iter()
        .map(|v| v.to_f64())
        .find(|v| *v > max || *v < min)
    {
        return Err(conversion_error(
            T::DTYPE,
            format!("value {bad:e} is outside the representable range and would lose information"),
        ));
    }

    Ok(x.map(narrow))
}

/// Converts stored `f32` data back to the caller's element type.
#[must_use]
pub fn from_f32<T: Element>(x: &Matrix<f32>) -> Matrix<T> {
    x.map(|v| T::from_f64(f64::from(v)))
}

#[allow(clippy::cast_possible_truncation)]
fn narrow<T: Element>(v: T) -> f32 {
    v.to_f64() as f32
}

fn conversion_error(from: DType, reason: String) -> NeighborsError {
    NeighborsError::DataConversion {
        from: from.to_string(),
        to: DType::Float32.to_string(),
        reason,
    }
}
