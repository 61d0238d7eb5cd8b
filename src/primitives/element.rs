//! Numeric element types accepted as point-set input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type tag of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// 32-bit IEEE float (the storage precision of a fitted index)
    Float32,
    /// 64-bit IEEE float
    Float64,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
}

impl DType {
    /// NumPy-style name of the type.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scalar that can be fed to the engine.
///
/// Every element widens losslessly to `f64` for range checks; `from_f64`
/// maps stored values back to the caller's type.
pub trait Element: Copy + Send + Sync + fmt::Debug + PartialOrd + 'static {
    /// Tag for this element type.
    const DTYPE: DType;

    /// Widens the value to `f64`.
    fn to_f64(self) -> f64;

    /// Narrows an `f64` back to this type (saturating for integers).
    fn from_f64(value: f64) -> Self;
}

impl Element for f32 {
    const DTYPE: DType = DType::Float32;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Element for f64 {
    const DTYPE: DType = DType::Float64;

    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

impl Element for i32 {
    const DTYPE: DType = DType::Int32;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(value: f64) -> Self {
        value.round() as i32
    }
}

impl Element for i64 {
    const DTYPE: DType = DType::Int64;

    #[allow(clippy::cast_precision_loss)]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(value: f64) -> Self {
        value.round() as i64
    }
}
