use rand::prelude::*;

use crate::error::{NnError, Result};

/// Dense row-major matrix of `f64`.
///
/// Shape is fixed at construction; every operation either keeps the shape of
/// the receiver or builds a new matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) data: Vec<Vec<f64>>,
}

impl Matrix {
    /// Zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Result<Matrix> {
        if rows == 0 || cols == 0 {
            return Err(NnError::InvalidDimension { rows, cols });
        }
        Ok(Matrix::zeros(rows, cols))
    }

    // Callers guarantee positive dimensions.
    fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Overwrites every entry with a uniform sample from [-1, 1].
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    /// Same as [`Matrix::randomize`] but draws from the supplied generator.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in self.data.iter_mut() {
            for x in row.iter_mut() {
                *x = rng.gen_range(-1.0..=1.0);
            }
        }
    }

    /// Builds a matrix from explicit rows. Every row must have the same,
    /// non-zero length.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(NnError::InvalidDimension { rows, cols });
        }
        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(NnError::DimensionMismatch {
                op: "from_rows",
                left: (1, cols),
                right: (1, bad.len()),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Builds an `N x 1` column matrix from `values`, preserving order.
    pub fn from_array(values: &[f64]) -> Result<Matrix> {
        if values.is_empty() {
            return Err(NnError::InvalidDimension { rows: 0, cols: 1 });
        }
        Ok(Matrix {
            rows: values.len(),
            cols: 1,
            data: values.iter().map(|&v| vec![v]).collect(),
        })
    }

    /// Flattens the matrix in row-major order.
    pub fn to_array(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    /// In-place element-wise sum.
    pub fn add(&mut self, other: &Matrix) -> Result<()> {
        self.check_same_shape("add", other)?;
        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (x, y) in row.iter_mut().zip(other_row.iter()) {
                *x += y;
            }
        }
        Ok(())
    }

    /// Returns `a - b` as a new matrix.
    pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        a.check_same_shape("subtract", b)?;
        let data = a
            .data
            .iter()
            .zip(b.data.iter())
            .map(|(row_a, row_b)| row_a.iter().zip(row_b.iter()).map(|(x, y)| x - y).collect())
            .collect();
        Ok(Matrix { rows: a.rows, cols: a.cols, data })
    }

    /// Matrix product `a · b`. Requires `a.cols == b.rows`.
    pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        if a.cols != b.rows {
            return Err(NnError::DimensionMismatch {
                op: "multiply",
                left: a.shape(),
                right: b.shape(),
            });
        }

        let mut res = Matrix::zeros(a.rows, b.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..a.cols {
                    sum += a.data[i][k] * b.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    /// In-place element-wise (Hadamard) product.
    pub fn hadamard(&mut self, other: &Matrix) -> Result<()> {
        self.check_same_shape("hadamard", other)?;
        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (x, y) in row.iter_mut().zip(other_row.iter()) {
                *x *= y;
            }
        }
        Ok(())
    }

    /// Multiplies every entry by `scalar`.
    pub fn scale(&mut self, scalar: f64) {
        self.apply_in_place(|x| x * scalar);
    }

    /// New matrix of the same shape with `functor` applied to every entry.
    pub fn mapped<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Applies `functor` to every entry of the receiver.
    pub fn apply_in_place<F>(&mut self, functor: F)
    where
        F: Fn(f64) -> f64,
    {
        for row in self.data.iter_mut() {
            for x in row.iter_mut() {
                *x = functor(*x);
            }
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    fn check_same_shape(&self, op: &'static str, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(NnError::DimensionMismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }
}
