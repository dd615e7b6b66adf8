use crate::error::{RNNError, Result};
use crate::numeric::Scalar;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Dense row-major matrix. Element (row, col) is stored at `data[row * cols + col]`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "RawMatrix<T>")]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

// Deserialized form, checked before it becomes a Matrix.
#[derive(Deserialize)]
struct RawMatrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> TryFrom<RawMatrix<T>> for Matrix<T> {
    type Error = RNNError;

    fn try_from(raw: RawMatrix<T>) -> Result<Self> {
        let expected = raw.rows.checked_mul(raw.cols).unwrap_or(usize::MAX);
        if raw.data.len() != expected {
            return Err(RNNError::mismatch("matrix data", expected, raw.data.len()));
        }
        Ok(Matrix {
            data: raw.data,
            rows: raw.rows,
            cols: raw.cols,
        })
    }
}

impl<T: Scalar> Matrix<T> {
    /// Zero-filled matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
        }
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(RNNError::mismatch("matrix data", rows * cols, data.len()));
        }
        Ok(Matrix { data, rows, cols })
    }

    /// Builds a matrix out of nested rows. All rows must be equally long.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows.iter() {
            if row.len() != cols {
                return Err(RNNError::mismatch("matrix row", cols, row.len()));
            }
            data.extend_from_slice(row);
        }
        Ok(Matrix {
            data,
            rows: rows.len(),
            cols,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn walk<F>(&mut self, mut callback: F)
    where
        F: FnMut(&mut T),
    {
        for v in self.data.iter_mut() {
            callback(v);
        }
    }

    /// `out += self * v`
    ///
    /// Each row's dot product is summed on its own before being added to `out`, so calling this
    /// twice on a zeroed `out` gives exactly `(A * a) + (B * b)`.
    pub fn mul_vec_add_into(&self, v: &[T], out: &mut [T]) -> Result<()> {
        if v.len() != self.cols {
            return Err(RNNError::mismatch("matrix-vector operand", self.cols, v.len()));
        }
        if out.len() != self.rows {
            return Err(RNNError::mismatch("matrix-vector result", self.rows, out.len()));
        }
        for target_idx in 0..self.rows {
            let row = self.row(target_idx);
            let mut sum = T::zero();
            for source_idx in 0..self.cols {
                sum = sum + row[source_idx] * v[source_idx];
            }
            out[target_idx] = out[target_idx] + sum;
        }
        Ok(())
    }

    pub fn mul_vec(&self, v: &[T]) -> Result<Vec<T>> {
        let mut out = vec![T::zero(); self.rows];
        self.mul_vec_add_into(v, &mut out)?;
        Ok(out)
    }
}
