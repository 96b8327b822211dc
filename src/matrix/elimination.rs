//! Gaussian elimination. Each pass applies the first row operation that fits,
//! mirrored onto the augment when inverting.

use crate::config::{config, Config};
use crate::error::{MatrixError, Result};
use crate::matrix::dense::DenseMatrix;
use crate::matrix::matrix::Matrix;
use crate::matrix::scalar::Scalar;

/// Returns the triangular form and the number of row swaps.
pub fn triangularize<T: Scalar>(matrix: &DenseMatrix<T>) -> Result<(DenseMatrix<T>, usize)> {
    triangularize_with(matrix, config())
}

pub fn triangularize_with<T: Scalar>(
    matrix: &DenseMatrix<T>,
    config: &Config,
) -> Result<(DenseMatrix<T>, usize)> {
    let mut elimination = Elimination::new(matrix, None, config);
    elimination.triangular()?;
    Ok((elimination.matrix, elimination.swaps))
}

pub fn echelon_form<T: Scalar>(matrix: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
    echelon_form_with(matrix, config())
}

pub fn echelon_form_with<T: Scalar>(
    matrix: &DenseMatrix<T>,
    config: &Config,
) -> Result<DenseMatrix<T>> {
    let mut elimination = Elimination::new(matrix, None, config);
    elimination.triangular()?;
    elimination.echelon()?;
    Ok(elimination.matrix)
}

pub fn invert<T: Scalar>(matrix: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
    invert_with(matrix, config())
}

pub fn invert_with<T: Scalar>(matrix: &DenseMatrix<T>, config: &Config) -> Result<DenseMatrix<T>> {
    matrix.require_square("inverse")?;

    let identity = DenseMatrix::identity(matrix.columns());
    let mut elimination = Elimination::new(matrix, Some(identity), config);
    elimination.identity_form()?;

    elimination.augment.ok_or(MatrixError::NotInvertible)
}

struct Elimination<T> {
    matrix: DenseMatrix<T>,
    augment: Option<DenseMatrix<T>>,
    swaps: usize,
    steps: usize,
    max_steps: usize,
}

impl<T: Scalar> Elimination<T> {
    fn new(matrix: &DenseMatrix<T>, augment: Option<DenseMatrix<T>>, config: &Config) -> Self {
        Elimination {
            matrix: matrix.clone(),
            augment,
            swaps: 0,
            steps: 0,
            max_steps: config.max_elimination_steps,
        }
    }

    fn triangular(&mut self) -> Result<()> {
        while !self.is_triangular() {
            if self.swap_rows() || self.eliminate_forward() || self.repair_pivot() {
                self.tick()?;
                continue;
            }
            return Err(MatrixError::NotReducible);
        }
        log::debug!(
            "triangular form of {:?} after {} steps, {} swaps",
            self.matrix.shape(),
            self.steps,
            self.swaps
        );
        Ok(())
    }

    fn echelon(&mut self) -> Result<()> {
        while self.complete_echelon() {
            self.tick()?;
        }
        log::debug!(
            "echelon form of {:?} after {} steps",
            self.matrix.shape(),
            self.steps
        );
        Ok(())
    }

    fn identity_form(&mut self) -> Result<()> {
        while !self.is_identity() {
            if self.swap_rows()
                || self.eliminate_forward()
                || self.eliminate_backward()
                || self.normalize_row()
            {
                self.tick()?;
                continue;
            }
            log::debug!("elimination stalled after {} steps", self.steps);
            return Err(MatrixError::NotInvertible);
        }
        log::debug!(
            "identity form of {:?} after {} steps",
            self.matrix.shape(),
            self.steps
        );
        Ok(())
    }

    fn tick(&mut self) -> Result<()> {
        self.steps += 1;
        if self.steps > self.max_steps {
            log::warn!("elimination step budget of {} exhausted", self.max_steps);
            return Err(MatrixError::StepLimitExceeded { steps: self.steps });
        }
        Ok(())
    }

    fn is_triangular(&self) -> bool {
        let columns = self.matrix.columns();
        (1..self.matrix.rows()).all(|row| {
            self.matrix.row(row)[..row.min(columns)]
                .iter()
                .all(|v| v.is_zero())
        })
    }

    fn is_identity(&self) -> bool {
        (0..self.matrix.rows()).all(|row| {
            self.matrix.row(row).iter().enumerate().all(|(col, v)| {
                if col == row {
                    v.is_exact_one()
                } else {
                    v.is_zero()
                }
            })
        })
    }

    fn leading_zeros(&self) -> Vec<usize> {
        let columns = self.matrix.columns();
        (0..self.matrix.rows())
            .map(|row| {
                self.matrix
                    .row(row)
                    .iter()
                    .position(|v| !v.is_zero())
                    .unwrap_or(columns)
            })
            .collect()
    }

    fn trailing_zeros(&self) -> Vec<usize> {
        let columns = self.matrix.columns();
        (0..self.matrix.rows())
            .map(|row| {
                self.matrix
                    .row(row)
                    .iter()
                    .rev()
                    .position(|v| !v.is_zero())
                    .unwrap_or(columns)
            })
            .collect()
    }

    // The first row whose leading zeros don't match its index is the
    // candidate; it trades places with the next mismatched row that starts
    // strictly further left.
    fn swap_rows(&mut self) -> bool {
        let leading = self.leading_zeros();
        let mut candidate: Option<usize> = None;

        for (row, &lead) in leading.iter().enumerate() {
            if lead == row {
                continue;
            }
            match candidate {
                None => candidate = Some(row),
                Some(c) if lead < leading[c] => {
                    self.exchange(c, row);
                    return true;
                }
                Some(_) => {}
            }
        }
        false
    }

    fn eliminate_forward(&mut self) -> bool {
        let columns = self.matrix.columns();
        let leading = self.leading_zeros();

        for row in 1..leading.len() {
            let pivot = leading[row];
            if pivot >= row || pivot == columns {
                continue;
            }
            if self.matrix[(pivot, pivot)].is_zero() {
                continue;
            }
            log::trace!("forward: clear column {pivot} of row {row}");
            self.subtract_scaled_row(row, pivot, pivot);
            return true;
        }
        false
    }

    fn eliminate_backward(&mut self) -> bool {
        let columns = self.matrix.columns();
        let trailing = self.trailing_zeros();
        let rows = trailing.len();

        for row in (0..rows.saturating_sub(1)).rev() {
            if trailing[row] >= rows - 1 - row {
                continue;
            }
            let pivot = columns - 1 - trailing[row];
            if self.matrix[(pivot, pivot)].is_zero() {
                continue;
            }
            log::trace!("backward: clear column {pivot} of row {row}");
            self.subtract_scaled_row(row, pivot, pivot);
            return true;
        }
        false
    }

    fn normalize_row(&mut self) -> bool {
        let columns = self.matrix.columns();

        for row in 0..self.matrix.rows().min(columns) {
            let diagonal = &self.matrix[(row, row)];
            if diagonal.is_zero() || diagonal.is_exact_one() {
                continue;
            }
            let multiplier = diagonal.reciprocal();
            log::trace!("normalize row {row} by {multiplier}");

            for col in 0..columns {
                let value = self.matrix[(col, row)].clone() * multiplier.clone();
                self.matrix[(col, row)] = value;

                if let Some(augment) = self.augment.as_mut() {
                    if col < augment.columns() {
                        let value = augment[(col, row)].clone() * multiplier.clone();
                        augment[(col, row)] = value;
                    }
                }
            }
            // x * (1 / x) is not always one in floating point
            self.matrix[(row, row)] = T::one();
            return true;
        }
        false
    }

    // A nonzero row whose leading entry sits left of the diagonal, under a
    // zero pivot, moves into the pivot row. Only reached when neither the
    // swap heuristic nor a combination applies.
    fn repair_pivot(&mut self) -> bool {
        let columns = self.matrix.columns();
        let leading = self.leading_zeros();

        for row in 1..leading.len() {
            let pivot = leading[row];
            if pivot < row && pivot < columns {
                log::trace!("pivot {pivot} is zero, pulling up row {row}");
                self.exchange(pivot, row);
                return true;
            }
        }
        false
    }

    fn complete_echelon(&mut self) -> bool {
        let columns = self.matrix.columns();
        let leading = self.leading_zeros();

        for lower in 1..leading.len() {
            if leading[lower] == columns {
                continue;
            }
            for upper in 0..lower {
                if leading[upper] > leading[lower] {
                    self.exchange(upper, lower);
                    return true;
                }
                if leading[upper] == leading[lower] {
                    log::trace!("echelon: clear column {} of row {lower}", leading[upper]);
                    self.subtract_scaled_row(lower, upper, leading[upper]);
                    return true;
                }
            }
        }
        false
    }

    fn exchange(&mut self, a: usize, b: usize) {
        log::trace!("swap rows {a} and {b}");
        self.matrix.swap_rows(a, b);
        if let Some(augment) = self.augment.as_mut() {
            augment.swap_rows(a, b);
        }
        self.swaps += 1;
    }

    // row[target] -= factor * row[source], clearing `column` exactly
    fn subtract_scaled_row(&mut self, target: usize, source: usize, column: usize) {
        let factor =
            self.matrix[(column, target)].clone() / self.matrix[(column, source)].clone();

        for col in 0..self.matrix.columns() {
            let value = if col == column {
                T::zero()
            } else {
                self.matrix[(col, target)].clone()
                    - factor.clone() * self.matrix[(col, source)].clone()
            };
            self.matrix[(col, target)] = value;

            if let Some(augment) = self.augment.as_mut() {
                if col < augment.columns() {
                    let value = augment[(col, target)].clone()
                        - factor.clone() * augment[(col, source)].clone();
                    augment[(col, target)] = value;
                }
            }
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
