use crate::config::config;
use crate::error::{MatrixError, Result};
use crate::matrix::dense::DenseMatrix;
use crate::matrix::scalar::Scalar;
use crate::rings::fraction::Fraction;
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::ops;

// Parallel over output rows above the configured threshold.
fn fill_rows<T, F>(columns: usize, rows: usize, fill: F) -> DenseMatrix<T>
where
    T: Scalar,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    let mut cells = vec![T::zero(); columns * rows];
    if columns > 0 {
        if config().is_parallel(cells.len()) {
            cells
                .par_chunks_mut(columns)
                .enumerate()
                .for_each(|(r, row)| fill(r, row));
        } else {
            cells
                .chunks_mut(columns)
                .enumerate()
                .for_each(|(r, row)| fill(r, row));
        }
    }
    DenseMatrix::from_raw(columns, cells)
}

impl<T: Scalar> DenseMatrix<T> {
    pub fn map<F>(&self, f: F) -> DenseMatrix<T>
    where
        F: Fn(&T) -> T + Sync + Send,
    {
        let cells = if config().is_parallel(self.values().len()) {
            self.values().par_iter().map(&f).collect()
        } else {
            self.values().iter().map(&f).collect()
        };
        DenseMatrix::from_raw(self.columns(), cells)
    }

    pub fn zip_with<F>(&self, rhs: &DenseMatrix<T>, op: &'static str, f: F) -> Result<DenseMatrix<T>>
    where
        F: Fn(&T, &T) -> T + Sync + Send,
    {
        if self.shape() != rhs.shape() {
            return Err(MatrixError::ShapeMismatch {
                op,
                expected: self.shape(),
                got: rhs.shape(),
            });
        }

        let cells = if config().is_parallel(self.values().len()) {
            self.values()
                .par_iter()
                .zip(rhs.values().par_iter())
                .map(|(a, b)| f(a, b))
                .collect()
        } else {
            self.values()
                .iter()
                .zip(rhs.values().iter())
                .map(|(a, b)| f(a, b))
                .collect()
        };
        Ok(DenseMatrix::from_raw(self.columns(), cells))
    }

    pub(crate) fn transposed(&self) -> DenseMatrix<T> {
        fill_rows(self.rows(), self.columns(), |r, row| {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self[(r, c)].clone();
            }
        })
    }

    pub fn scalar_add(&self, scalar: &T) -> DenseMatrix<T> {
        self.map(|v| v.clone() + scalar.clone())
    }

    pub fn scalar_sub(&self, scalar: &T) -> DenseMatrix<T> {
        self.map(|v| v.clone() - scalar.clone())
    }

    /// `scalar - cell`
    pub fn scalar_sub_from(&self, scalar: &T) -> DenseMatrix<T> {
        self.map(|v| scalar.clone() - v.clone())
    }

    pub fn scalar_mul(&self, scalar: &T) -> DenseMatrix<T> {
        self.map(|v| v.clone() * scalar.clone())
    }

    pub fn scalar_div(&self, scalar: &T) -> DenseMatrix<T> {
        self.map(|v| v.clone() / scalar.clone())
    }

    /// `scalar / cell`
    pub fn scalar_div_by(&self, scalar: &T) -> DenseMatrix<T> {
        self.map(|v| scalar.clone() / v.clone())
    }
}

impl<T: Scalar> ops::Add<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>>;

    fn add(self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        self.zip_with(rhs, "add", |a, b| a.clone() + b.clone())
    }
}

impl<T: Scalar> ops::Sub<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>>;

    fn sub(self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        self.zip_with(rhs, "sub", |a, b| a.clone() - b.clone())
    }
}

impl<T: Scalar> ops::Mul<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>>;

    fn mul(self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        if self.columns() != rhs.rows() {
            return Err(MatrixError::ShapeMismatch {
                op: "mul",
                expected: (rhs.columns(), self.columns()),
                got: rhs.shape(),
            });
        }

        let inner = self.columns();
        Ok(fill_rows(rhs.columns(), self.rows(), |r, row| {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..inner)
                    .map(|k| self[(k, r)].clone() * rhs[(c, k)].clone())
                    .sum();
            }
        }))
    }
}

impl<T: Scalar> ops::Neg for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn neg(self) -> DenseMatrix<T> {
        self.map(|v| -v.clone())
    }
}

macro_rules! impl_scalar_ops {
    ($($t:ty),*) => {$(
        impl ops::Add<$t> for &DenseMatrix<$t> {
            type Output = DenseMatrix<$t>;

            fn add(self, rhs: $t) -> DenseMatrix<$t> {
                self.scalar_add(&rhs)
            }
        }

        impl ops::Add<&DenseMatrix<$t>> for $t {
            type Output = DenseMatrix<$t>;

            fn add(self, rhs: &DenseMatrix<$t>) -> DenseMatrix<$t> {
                rhs.map(|v| self.clone() + v.clone())
            }
        }

        impl ops::Sub<$t> for &DenseMatrix<$t> {
            type Output = DenseMatrix<$t>;

            fn sub(self, rhs: $t) -> DenseMatrix<$t> {
                self.scalar_sub(&rhs)
            }
        }

        impl ops::Sub<&DenseMatrix<$t>> for $t {
            type Output = DenseMatrix<$t>;

            fn sub(self, rhs: &DenseMatrix<$t>) -> DenseMatrix<$t> {
                rhs.scalar_sub_from(&self)
            }
        }

        impl ops::Mul<$t> for &DenseMatrix<$t> {
            type Output = DenseMatrix<$t>;

            fn mul(self, rhs: $t) -> DenseMatrix<$t> {
                self.scalar_mul(&rhs)
            }
        }

        impl ops::Mul<&DenseMatrix<$t>> for $t {
            type Output = DenseMatrix<$t>;

            fn mul(self, rhs: &DenseMatrix<$t>) -> DenseMatrix<$t> {
                rhs.map(|v| self.clone() * v.clone())
            }
        }

        impl ops::Div<$t> for &DenseMatrix<$t> {
            type Output = DenseMatrix<$t>;

            fn div(self, rhs: $t) -> DenseMatrix<$t> {
                self.scalar_div(&rhs)
            }
        }

        impl ops::Div<&DenseMatrix<$t>> for $t {
            type Output = DenseMatrix<$t>;

            fn div(self, rhs: &DenseMatrix<$t>) -> DenseMatrix<$t> {
                rhs.scalar_div_by(&self)
            }
        }
    )*};
}

impl_scalar_ops!(f64, f32, Decimal, Fraction);

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
