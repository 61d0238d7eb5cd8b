//! Compressed Sparse Row (CSR) matrices for neighbor graphs.
//!
//! A k-neighbor graph stores exactly `k` entries per row, so CSR keeps it in
//! three flat vectors:
//!
//! - `indptr`: row offsets into `indices`/`data` (length = `n_rows + 1`)
//! - `indices`: column of each stored entry
//! - `data`: value of each stored entry
//!
//! Entries keep the order they were inserted in; for neighbor graphs that is
//! ascending distance, not ascending column.
//!
//! # Examples
//!
//! ```
//! use kneighbors::sparse::CsrMatrix;
//!
//! let m = CsrMatrix::from_parts(2, 3, vec![0, 1, 3], vec![2, 0, 1], vec![1.0, 0.5, 2.0])
//!     .expect("valid CSR buffers");
//! assert_eq!(m.nnz(), 3);
//! assert_eq!(m.get(1, 1), 2.0);
//! assert_eq!(m.get(0, 0), 0.0);
//! ```

use crate::error::{NeighborsError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// Sparse matrix in CSR layout with `f32` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
    n_rows: usize,
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f32>,
}

impl CsrMatrix {
    /// Builds a CSR matrix from raw buffers.
    ///
    /// # Errors
    ///
    /// Returns an error if `indptr` is not a non-decreasing sequence of
    /// length `n_rows + 1` ending at `indices.len()`, if `indices` and `data`
    /// differ in length, or if a column index is out of range.
    pub fn from_parts(
        n_rows: usize,
        n_cols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<f32>,
    ) -> Result<Self> {
        if indptr.len() != n_rows + 1 {
            return Err(NeighborsError::dimension_mismatch(
                "indptr length",
                n_rows + 1,
                indptr.len(),
            ));
        }
        if indices.len() != data.len() {
            return Err(NeighborsError::dimension_mismatch(
                "data length",
                indices.len(),
                data.len(),
            ));
        }
        if indptr.first() != Some(&0)
            || indptr.last() != Some(&indices.len())
            || indptr.windows(2).any(|w| w[0] > w[1])
        {
            return Err(NeighborsError::InvalidInput {
                message: "indptr must start at 0, be non-decreasing and end at nnz".to_string(),
            });
        }
        if let Some(&col) = indices.iter().find(|&&c| c >= n_cols) {
            return Err(NeighborsError::InvalidInput {
                message: format!("column index {col} out of bounds (n_cols={n_cols})"),
            });
        }
        Ok(Self {
            n_rows,
            n_cols,
            indptr,
            indices,
            data,
        })
    }

    /// Builds a matrix with the same number of entries in every row.
    ///
    /// `indices` and `data` are row-major with `per_row` entries per row.
    pub(crate) fn from_uniform_rows(
        n_cols: usize,
        per_row: usize,
        indices: Vec<usize>,
        data: Vec<f32>,
    ) -> Result<Self> {
        let n_rows = if per_row == 0 { 0 } else { indices.len() / per_row };
        let indptr = (0..=n_rows).map(|i| i * per_row).collect();
        Self::from_parts(n_rows, n_cols, indptr, indices, data)
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Number of stored entries (explicit zeros included).
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Row offsets.
    #[must_use]
    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    /// Column index of every stored entry.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Value of every stored entry.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Iterates over the stored `(column, value)` pairs of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f32)> + '_ {
        let span = self.indptr[row]..self.indptr[row + 1];
        self.indices[span.clone()]
            .iter()
            .copied()
            .zip(self.data[span].iter().copied())
    }

    /// Value at (row, col), `0.0` when no entry is stored.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.row(row)
            .filter(|&(c, _)| c == col)
            .map(|(_, v)| v)
            .sum()
    }

    /// Expands to a dense matrix; duplicate entries are summed.
    #[must_use]
    pub fn to_dense(&self) -> Matrix<f32> {
        let mut dense = Matrix::<f32>::zeros(self.n_rows, self.n_cols);
        for i in 0..self.n_rows {
            for (j, v) in self.row(i) {
                dense.set(i, j, dense.get(i, j) + v);
            }
        }
        dense
    }
}
