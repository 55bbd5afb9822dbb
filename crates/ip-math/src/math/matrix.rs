//! Dense row-major matrix of `f64`.
//!
//! Only the handful of operations the credal computations need: construction
//! from nested rows, transposition, matrix product, and row/column access.
//! Constructors that can fail on shape return `None`, mirroring the
//! validation style of the distribution parameter types.

use super::stable::dot;
use serde::{Deserialize, Serialize};

/// A `rows × cols` matrix stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixParts")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Serialized form; shape is checked before it becomes a [`Matrix`].
#[derive(Deserialize)]
struct MatrixParts {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<MatrixParts> for Matrix {
    type Error = String;

    fn try_from(parts: MatrixParts) -> Result<Self, Self::Error> {
        let len = parts.data.len();
        Matrix::from_vec(parts.rows, parts.cols, parts.data).ok_or_else(|| {
            format!(
                "matrix data has {} entries, expected {} x {}",
                len, parts.rows, parts.cols
            )
        })
    }
}

impl Matrix {
    /// All-zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// Returns None if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        if rows.checked_mul(cols)? != data.len() {
            return None;
        }
        Some(Self { rows, cols, data })
    }

    /// Build from nested rows.
    ///
    /// Returns None if the rows are ragged. An empty slice yields a `0 × 0`
    /// matrix.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Option<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return None;
            }
            data.extend_from_slice(row);
        }
        Some(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Build from nested columns (each inner slice becomes one column).
    pub fn from_columns<C: AsRef<[f64]>>(columns: &[C]) -> Option<Self> {
        Self::from_rows(columns).map(|m| m.transpose())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Entry at `(i, j)`, or None when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.rows || j >= self.cols {
            return None;
        }
        Some(self.data[i * self.cols + j])
    }

    /// Borrow row `i`.
    ///
    /// # Panics
    /// Panics if `i >= rows`.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.rows, "row index {} out of range ({} rows)", i, self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Copy out column `j`.
    ///
    /// # Panics
    /// Panics if `j >= cols`.
    pub fn column(&self, j: usize) -> Vec<f64> {
        assert!(j < self.cols, "column index {} out of range ({} cols)", j, self.cols);
        (0..self.rows).map(|i| self.data[i * self.cols + j]).collect()
    }

    /// Iterate over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Iterate over columns as owned vectors.
    pub fn iter_columns(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.cols).map(move |j| self.column(j))
    }

    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.data[i * self.cols + j]);
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Standard product `self · rhs`.
    ///
    /// Entry `(i, j)` is the left-to-right dot product of row `i` of `self`
    /// with column `j` of `rhs`. Returns None if `self.cols != rhs.rows`.
    pub fn matmul(&self, rhs: &Matrix) -> Option<Matrix> {
        if self.cols != rhs.rows {
            return None;
        }
        let rhs_t = rhs.transpose();
        let mut data = Vec::with_capacity(self.rows * rhs.cols);
        for i in 0..self.rows {
            let lhs_row = self.row(i);
            for j in 0..rhs.cols {
                data.push(dot(lhs_row, rhs_t.row(j)));
            }
        }
        Some(Matrix {
            rows: self.rows,
            cols: rhs.cols,
            data,
        })
    }

    /// Apply `f` to every row, collecting one value per row.
    pub fn map_rows<T, F: FnMut(&[f64]) -> T>(&self, f: F) -> Vec<T> {
        self.iter_rows().map(f).collect()
    }

    /// Nested-`Vec` copy, one inner vector per row.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(|r| r.to_vec()).collect()
    }

    /// Raw row-major storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
