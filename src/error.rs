//! Error types for nearest-neighbor operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for nearest-neighbor operations.
///
/// Covers queries issued before fitting, precision conversions that are
/// disabled or lossy, feature-count mismatches and invalid hyperparameters.
///
/// # Examples
///
/// ```
/// use kneighbors::error::NeighborsError;
///
/// let err = NeighborsError::DimensionMismatch {
///     expected: "n_features=10".to_string(),
///     actual: "5".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum NeighborsError {
    /// A query was issued before a successful `fit`.
    NotFitted {
        /// Estimator name
        estimator: String,
    },

    /// Input data needs a precision conversion that is disabled or lossy.
    DataConversion {
        /// Source element type
        from: String,
        /// Storage element type
        to: String,
        /// Why the conversion was refused
        reason: String,
    },

    /// Query dimensionality disagrees with the fitted data.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Metric name not in the supported set.
    UnsupportedMetric {
        /// Name that failed to parse
        name: String,
    },

    /// Structurally invalid input (empty matrix, inconsistent buffers).
    InvalidInput {
        /// Error description
        message: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for NeighborsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeighborsError::NotFitted { estimator } => {
                write!(
                    f,
                    "{estimator} is not fitted yet: call fit before querying"
                )
            }
            NeighborsError::DataConversion { from, to, reason } => {
                write!(f, "Data conversion from {from} to {to} failed: {reason}")
            }
            NeighborsError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {expected}, got {actual}"
                )
            }
            NeighborsError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            NeighborsError::UnsupportedMetric { name } => {
                write!(f, "Unsupported metric: {name}")
            }
            NeighborsError::InvalidInput { message } => {
                write!(f, "Invalid input: {message}")
            }
            NeighborsError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for NeighborsError {}

impl From<&str> for NeighborsError {
    fn from(msg: &str) -> Self {
        NeighborsError::Other(msg.to_string())
    }
}

impl From<String> for NeighborsError {
    fn from(msg: String) -> Self {
        NeighborsError::Other(msg)
    }
}

impl NeighborsError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create a not-fitted error for the named estimator
    #[must_use]
    pub fn not_fitted(estimator: &str) -> Self {
        Self::NotFitted {
            estimator: estimator.to_string(),
        }
    }

    /// Create an invalid hyperparameter error
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::InvalidInput {
            message: format!("empty input: {context}"),
        }
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for NeighborsError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<NeighborsError> for &str {
    fn eq(&self, other: &NeighborsError) -> bool {
        *self == other.to_string()
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, NeighborsError>;
