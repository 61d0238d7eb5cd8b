//! Core data primitives (Matrix, element types, precision conversion).
//!
//! Point sets, neighbor indices and dense graph exports are all stored as
//! row-major [`Matrix`] values.

pub mod convert;
mod element;
mod matrix;

pub use element::{DType, Element};
pub use matrix::Matrix;
