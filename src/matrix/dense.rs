use crate::error::{MatrixError, Result};
use crate::matrix::elimination;
use crate::matrix::matrix::Matrix;
use crate::matrix::scalar::Scalar;
use itertools::Itertools;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Row-major, rows derived from the cell count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DenseMatrix<T> {
    columns: usize,
    cells: Vec<T>,
}

impl<T: Scalar> DenseMatrix<T> {
    pub fn new(columns: usize, rows: usize) -> DenseMatrix<T> {
        DenseMatrix {
            columns,
            cells: vec![T::zero(); columns * rows],
        }
    }

    pub fn from_values(columns: usize, values: Vec<T>) -> Result<DenseMatrix<T>> {
        if columns == 0 && !values.is_empty() {
            return Err(MatrixError::invalid(format!(
                "{} values given for a matrix without columns",
                values.len()
            )));
        }
        if columns != 0 && values.len() % columns != 0 {
            return Err(MatrixError::invalid(format!(
                "{} values don't fill rows of {} columns",
                values.len(),
                columns
            )));
        }
        Ok(DenseMatrix {
            columns,
            cells: values,
        })
    }

    pub(crate) fn from_raw(columns: usize, cells: Vec<T>) -> DenseMatrix<T> {
        debug_assert!(columns == 0 && cells.is_empty() || columns != 0 && cells.len() % columns == 0);
        DenseMatrix { columns, cells }
    }

    #[inline(always)]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.cells.len() / self.columns
        }
    }

    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        (self.columns, self.rows())
    }

    pub fn is_square(&self) -> bool {
        self.columns == self.rows()
    }

    pub fn values(&self) -> &[T] {
        &self.cells
    }

    pub fn into_values(self) -> Vec<T> {
        self.cells
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.columns..(row + 1) * self.columns]
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&T> {
        if column >= self.columns || row >= self.rows() {
            return None;
        }
        self.cells.get(row * self.columns + column)
    }

    pub fn set(&mut self, column: usize, row: usize, value: T) -> Result<()> {
        if column >= self.columns || row >= self.rows() {
            return Err(MatrixError::ShapeMismatch {
                op: "set",
                expected: self.shape(),
                got: (column + 1, row + 1),
            });
        }
        self.cells[row * self.columns + column] = value;
        Ok(())
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        for k in 0..self.columns {
            self.cells.swap(a * self.columns + k, b * self.columns + k);
        }
    }

    pub(crate) fn require_square(&self, op: &'static str) -> Result<()> {
        if !self.is_square() {
            return Err(MatrixError::not_square(op, self.columns, self.rows()));
        }
        Ok(())
    }
}

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (column, row): (usize, usize)) -> &T {
        assert!(column < self.columns, "column {column} out of range");
        &self.cells[row * self.columns + column]
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (column, row): (usize, usize)) -> &mut T {
        assert!(column < self.columns, "column {column} out of range");
        &mut self.cells[row * self.columns + column]
    }
}

impl<T: Scalar> Matrix<T> for DenseMatrix<T> {
    fn from_list(lines: Vec<Vec<T>>) -> Self {
        let columns = lines.iter().map(|l| l.len()).max().unwrap_or(0);

        DenseMatrix {
            columns,
            cells: lines
                .into_iter()
                .flat_map(|l| {
                    let padding = columns - l.len();
                    l.into_iter()
                        .chain(std::iter::repeat_n(T::zero(), padding))
                })
                .collect(),
        }
    }

    fn to_list(&self) -> Vec<Vec<T>> {
        if self.columns == 0 {
            return vec![];
        }
        self.cells
            .chunks(self.columns)
            .map(|line| line.into())
            .collect()
    }

    fn identity(n: usize) -> DenseMatrix<T> {
        DenseMatrix {
            columns: n,
            cells: (0..n)
                .flat_map(|i| (0..n).map(move |j| if i == j { T::one() } else { T::zero() }))
                .collect(),
        }
    }

    fn transpose(&self) -> DenseMatrix<T> {
        self.transposed()
    }

    fn trace(&self) -> Result<T> {
        self.require_square("trace")?;
        Ok((0..self.columns).map(|i| self[(i, i)].clone()).sum())
    }

    fn determinant(&self) -> Result<T> {
        self.require_square("determinant")?;

        let (triangular, swaps) = elimination::triangularize(self)?;
        let product = (0..triangular.columns)
            .map(|i| triangular[(i, i)].clone())
            .fold(T::one(), |acc, v| acc * v);

        Ok(if swaps % 2 == 1 { -product } else { product })
    }

    fn rank(&self) -> Result<usize> {
        let echelon = elimination::echelon_form(self)?;
        Ok((0..echelon.rows())
            .filter(|&r| echelon.row(r).iter().any(|v| !v.is_zero()))
            .count())
    }

    fn nullity(&self) -> Result<usize> {
        Ok(self.columns - self.rank()?)
    }

    fn inverse(&self) -> Result<DenseMatrix<T>> {
        elimination::invert(self)
    }

    #[inline(always)]
    fn at(&self, column: usize, row: usize) -> T {
        self[(column, row)].clone()
    }
}

impl<T: Scalar> fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.cells.iter().map(|v| v.to_string()).collect();
        let widths: Vec<usize> = (0..self.columns)
            .map(|c| {
                (0..self.rows())
                    .map(|r| rendered[r * self.columns + c].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let lines = (0..self.rows()).map(|r| {
            let cells = (0..self.columns)
                .map(|c| format!("{:>width$}", rendered[r * self.columns + c], width = widths[c]))
                .join(", ");
            format!("( {cells} )")
        });
        write!(f, "{}", lines.format("\n"))
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::fraction::Fraction;
    use rust_decimal::Decimal;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    fn m(lines: Vec<Vec<f64>>) -> DenseMatrix<f64> {
        DenseMatrix::from_list(lines)
    }

    #[test]
    fn test_construction() {
        let empty = DenseMatrix::<f64>::new(0, 0);
        assert_eq!(empty.shape(), (0, 0));
        assert_eq!(empty, DenseMatrix::from_values(0, vec![]).unwrap());
        assert_eq!(empty.to_list(), Vec::<Vec<f64>>::new());

        let zeros = DenseMatrix::<f64>::new(3, 2);
        assert_eq!(zeros.shape(), (3, 2));
        assert_eq!(zeros.values(), &[0.0; 6]);

        // Columns without rows, and rows without columns, both hold no cells.
        assert_eq!(DenseMatrix::<f64>::new(3, 0).rows(), 0);
        assert_eq!(DenseMatrix::<f64>::new(0, 3).rows(), 0);

        let a = m(vec![vec![1.1, 2.2, 3.3], vec![4.4, 5.5, 6.6]]);
        assert_eq!(
            a,
            DenseMatrix::from_values(3, vec![1.1, 2.2, 3.3, 4.4, 5.5, 6.6]).unwrap()
        );
        assert_eq!(a.rows(), 2);
        assert_eq!(a.columns(), 3);
        assert_eq!(a.at(2, 0), 3.3);
        assert_eq!(a.at(0, 1), 4.4);
        assert_eq!(a.row(1), &[4.4, 5.5, 6.6]);
        assert_eq!(a.clone(), a);
        assert_eq!(a.into_values(), vec![1.1, 2.2, 3.3, 4.4, 5.5, 6.6]);
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let a = m(vec![vec![1.0], vec![2.0, 3.0, 4.0]]);
        assert_eq!(a.to_list(), vec![vec![1.0, 0.0, 0.0], vec![2.0, 3.0, 4.0]]);
    }

    #[test]
    fn test_from_values_rejects_partial_rows() {
        assert!(matches!(
            DenseMatrix::from_values(3, vec![1.0, 2.0]),
            Err(MatrixError::InvalidOperand { .. })
        ));
        assert!(DenseMatrix::from_values(0, vec![1.0]).is_err());
    }

    #[test]
    fn test_get_set() {
        let mut a = DenseMatrix::<f64>::new(2, 3);
        a.set(1, 2, 7.5).unwrap();
        assert_eq!(a.get(1, 2), Some(&7.5));
        assert_eq!(a[(1, 2)], 7.5);
        assert_eq!(a.get(2, 0), None);
        assert_eq!(a.get(0, 3), None);
        assert!(matches!(
            a.set(2, 0, 1.0),
            Err(MatrixError::ShapeMismatch { op: "set", .. })
        ));
        a[(0, 0)] = -1.0;
        assert_eq!(a.to_list(), vec![vec![-1.0, 0.0], vec![0.0, 0.0], vec![0.0, 7.5]]);
    }

    #[test]
    fn test_equality() {
        let a = m(vec![vec![1.1, 2.2], vec![3.3, 4.4]]);
        assert_eq!(a, m(vec![vec![1.1, 2.2], vec![3.3, 4.4]]));
        assert_ne!(a, m(vec![vec![1.1, 2.2], vec![3.3, 5.5]]));
        assert_ne!(a, m(vec![vec![1.1, 2.2, 0.0], vec![3.3, 4.4, 0.0]]));
        // Same cells, different shape.
        assert_ne!(
            DenseMatrix::from_values(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap(),
            DenseMatrix::from_values(4, vec![1.0, 2.0, 3.0, 4.0]).unwrap()
        );
    }

    #[test]
    fn test_display() {
        let a = m(vec![vec![1.1, 10.1], vec![-1.5, 2.0]]);
        assert_eq!(a.to_string(), "(  1.1, 10.1 )\n( -1.5,    2 )");

        let b = m(vec![vec![0.0, -4.0], vec![2.0, 2.0]]);
        assert_eq!(b.to_string(), "( 0, -4 )\n( 2,  2 )");

        assert_eq!(DenseMatrix::<f64>::new(0, 0).to_string(), "");
    }

    #[test]
    fn test_transpose() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let t = a.transpose();
        assert_eq!(t.shape(), (2, 3));
        assert_eq!(
            t.to_list(),
            vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]
        );
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn test_trace() {
        let a = m(vec![vec![1.1, 2.2], vec![3.3, 4.4]]);
        assert_eq!(a.trace().unwrap(), 1.1 + 4.4);
        assert_eq!(DenseMatrix::<f64>::new(0, 0).trace().unwrap(), 0.0);
        assert!(matches!(
            DenseMatrix::<f64>::new(3, 2).trace(),
            Err(MatrixError::ShapeMismatch { op: "trace", .. })
        ));
    }

    #[test]
    fn test_determinant() {
        let cases = vec![
            (m(vec![vec![1.1, 2.2], vec![3.3, 4.4]]), -2.42),
            (
                m(vec![vec![1.1, 2.2, 3.3], vec![4.4, 1.1, 2.2], vec![3.3, 4.4, 5.5]]),
                10.648,
            ),
            (m(vec![vec![1.1, 1.1, 1.1]; 3]), 0.0),
            (
                m(vec![vec![0.0, 0.0, 1.1], vec![3.3, 2.2, 1.1], vec![1.1, 2.2, 3.3]]),
                5.324,
            ),
            (
                m(vec![
                    vec![2.0, 3.0, 4.0, 0.0],
                    vec![5.0, 2.0, 4.0, 3.0],
                    vec![2.0, 2.0, 3.0, 4.0],
                    vec![5.0, 3.0, 2.0, 4.0],
                ]),
                -119.0,
            ),
        ];
        for (matrix, expected) in cases {
            assert_close(matrix.determinant().unwrap(), expected);
            assert_close(matrix.transpose().determinant().unwrap(), expected);
        }

        assert_eq!(DenseMatrix::<f64>::new(0, 0).determinant().unwrap(), 1.0);
        for n in 1..6 {
            assert_eq!(DenseMatrix::<f64>::identity(n).determinant().unwrap(), 1.0);
        }
    }

    #[test]
    fn test_determinant_row_swap_flips_sign() {
        // One swap brings the pivot up; the diagonal product alone is +1.
        let a = m(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        assert_eq!(a.determinant().unwrap(), -1.0);

        let b = m(vec![vec![0.0, 2.0, 0.0], vec![3.0, 0.0, 0.0], vec![0.0, 0.0, 4.0]]);
        assert_eq!(b.determinant().unwrap(), -24.0);
    }

    #[test]
    fn test_non_square_is_rejected() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(
            a.determinant(),
            Err(MatrixError::ShapeMismatch {
                op: "determinant",
                expected: (3, 3),
                got: (3, 2),
            })
        );
        assert!(matches!(
            a.trace(),
            Err(MatrixError::ShapeMismatch { op: "trace", .. })
        ));
        assert!(matches!(
            a.inverse(),
            Err(MatrixError::ShapeMismatch { op: "inverse", .. })
        ));
    }

    #[test]
    fn test_rank_and_nullity() {
        let cases = vec![
            (m(vec![vec![1.1, 2.2], vec![3.3, 4.4]]), 2),
            (
                m(vec![vec![1.1, 2.2, 3.3], vec![4.4, 1.1, 2.2], vec![3.3, 4.4, 5.5]]),
                3,
            ),
            (m(vec![vec![1.1, 1.1, 1.1]; 3]), 1),
            (m(vec![vec![2.2, 3.3, 0.0], vec![-2.2, -3.3, 0.0]]), 1),
            (m(vec![vec![2.2, -2.2], vec![3.3, -3.3], vec![0.0, 0.0]]), 1),
            (m(vec![vec![2.0, 4.4, 0.0], vec![4.0, 8.8, 3.0]]), 2),
            (m(vec![vec![2.0, 4.0], vec![4.4, 8.8], vec![0.0, 3.0]]), 2),
            (m(vec![vec![0.0, 1.0], vec![0.0, 1.0]]), 1),
            (DenseMatrix::new(3, 2), 0),
            (DenseMatrix::new(0, 0), 0),
        ];
        for (matrix, expected) in cases {
            assert_eq!(matrix.rank().unwrap(), expected, "rank of\n{matrix}");
            assert_eq!(matrix.nullity().unwrap(), matrix.columns() - expected);
        }
    }

    #[test]
    fn test_inverse() {
        let a = m(vec![vec![1.1, 2.2], vec![3.3, 4.4]]);
        assert_eq!(
            a.inverse().unwrap(),
            m(vec![
                vec![-1.818181818181819, 0.9090909090909095],
                vec![1.363636363636364, -0.4545454545454547]
            ])
        );

        let b = m(vec![vec![1.1, 2.2, 3.3], vec![4.4, 1.1, 2.2], vec![3.3, 4.4, 5.5]]);
        assert_eq!(
            b.inverse().unwrap(),
            m(vec![
                vec![-0.34090909090909088, 0.22727272727272727, 0.11363636363636363],
                vec![-1.5909090909090908, -0.45454545454545436, 1.1363636363636362],
                vec![1.4772727272727275, 0.22727272727272718, -0.79545454545454553]
            ])
        );

        assert_eq!(
            DenseMatrix::<f64>::identity(3).inverse().unwrap(),
            DenseMatrix::identity(3)
        );
        assert_eq!(
            DenseMatrix::<f64>::new(0, 0).inverse().unwrap(),
            DenseMatrix::new(0, 0)
        );
    }

    #[test]
    fn test_inverse_of_singular_matrix() {
        let a = m(vec![vec![1.0, -2.0, 3.0], vec![2.0, -3.0, 5.0], vec![1.0, 1.0, 0.0]]);
        assert_eq!(a.inverse(), Err(MatrixError::NotInvertible));
        assert_eq!(a.determinant().unwrap(), 0.0);

        let zero_row = m(vec![vec![1.0, 2.0], vec![0.0, 0.0]]);
        assert_eq!(zero_row.inverse(), Err(MatrixError::NotInvertible));
        assert_eq!(zero_row.determinant().unwrap(), 0.0);

        let twin_rows = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![1.0, 2.0, 3.0]]);
        assert_eq!(twin_rows.inverse(), Err(MatrixError::NotInvertible));
        assert_eq!(twin_rows.determinant().unwrap(), 0.0);
    }

    #[test]
    fn test_fraction_matrix() {
        let fr = |s: &str| s.parse::<Fraction>().unwrap();
        let a = DenseMatrix::from_list(vec![
            vec![fr("1"), fr("2")],
            vec![fr("3"), fr("4")],
        ]);
        assert_eq!(a.determinant().unwrap(), fr("-2"));
        assert_eq!(
            a.inverse().unwrap().to_list(),
            vec![vec![fr("-2"), fr("1")], vec![fr("3/2"), fr("-1/2")]]
        );
        assert_eq!(a.inverse().unwrap().to_string(), "(  -2,    1 )\n( 3/2, -1/2 )");
        assert_eq!(a.rank().unwrap(), 2);
    }

    fn dec(lines: Vec<Vec<&str>>) -> DenseMatrix<Decimal> {
        DenseMatrix::from_list(
            lines
                .into_iter()
                .map(|l| l.into_iter().map(|v| v.parse().unwrap()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_decimal_determinant() {
        let cases = vec![
            (dec(vec![vec!["1.1", "2.2"], vec!["3.3", "4.4"]]), "-2.42"),
            (
                dec(vec![
                    vec!["1.1", "2.2", "3.3"],
                    vec!["4.4", "1.1", "2.2"],
                    vec!["3.3", "4.4", "5.5"],
                ]),
                "10.648",
            ),
            (dec(vec![vec!["1.1", "1.1", "1.1"]; 3]), "0"),
            (
                dec(vec![
                    vec!["0", "0", "1.1"],
                    vec!["3.3", "2.2", "1.1"],
                    vec!["1.1", "2.2", "3.3"],
                ]),
                "5.324",
            ),
            (
                dec(vec![
                    vec!["2", "3", "4", "0"],
                    vec!["5", "2", "4", "3"],
                    vec!["2", "2", "3", "4"],
                    vec!["5", "3", "2", "4"],
                ]),
                "-119",
            ),
        ];
        for (matrix, expected) in cases {
            let expected: Decimal = expected.parse().unwrap();
            assert_eq!(matrix.determinant().unwrap().round_dp(20), expected, "det of\n{matrix}");
        }

        // Exact in decimal, unlike binary floating point.
        let a = dec(vec![vec!["1.1", "2.2"], vec!["3.3", "4.4"]]);
        assert_eq!(a.determinant().unwrap(), "-2.42".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_decimal_rank() {
        let cases = vec![
            (dec(vec![vec!["1.1", "2.2"], vec!["3.3", "4.4"]]), 2),
            (
                dec(vec![
                    vec!["1.1", "2.2", "3.3"],
                    vec!["4.4", "1.1", "2.2"],
                    vec!["3.3", "4.4", "5.5"],
                ]),
                3,
            ),
            (dec(vec![vec!["1.1", "1.1", "1.1"]; 3]), 1),
            (dec(vec![vec!["2.2", "3.3", "0"], vec!["-2.2", "-3.3", "0"]]), 1),
            (dec(vec![vec!["2.2", "-2.2"], vec!["3.3", "-3.3"], vec!["0", "0"]]), 1),
            (dec(vec![vec!["2", "4.4", "0"], vec!["4", "8.8", "3"]]), 2),
            (dec(vec![vec!["2", "4"], vec!["4.4", "8.8"], vec!["0", "3"]]), 2),
        ];
        for (matrix, expected) in cases {
            assert_eq!(matrix.rank().unwrap(), expected, "rank of\n{matrix}");
            assert_eq!(matrix.nullity().unwrap(), matrix.columns() - expected);
        }
    }

    #[test]
    fn test_decimal_inverse() {
        let a = dec(vec![vec!["1.1", "2.2"], vec!["3.3", "4.4"]]);
        let inverse = a.inverse().unwrap().map(|v| v.round_dp(20));
        assert_eq!(
            inverse,
            dec(vec![
                vec!["-1.81818181818181818182", "0.90909090909090909091"],
                vec!["1.36363636363636363636", "-0.45454545454545454545"],
            ])
        );

        let singular = dec(vec![vec!["1", "-2", "3"], vec!["2", "-3", "5"], vec!["1", "1", "0"]]);
        assert_eq!(singular.inverse(), Err(MatrixError::NotInvertible));
    }

    #[test]
    fn test_single_precision() {
        let close = |actual: f32, expected: f32| {
            assert!((actual - expected).abs() < 1e-4 * (1.0 + expected.abs()), "expected {expected}, got {actual}")
        };
        let a = DenseMatrix::<f32>::from_list(vec![vec![1.1, 2.2], vec![3.3, 4.4]]);
        close(a.determinant().unwrap(), -2.42);
        assert_eq!(a.rank().unwrap(), 2);

        let inverse = a.inverse().unwrap();
        let expected = [-1.818_181_8, 0.909_090_9, 1.363_636_4, -0.454_545_45];
        for (actual, expected) in inverse.values().iter().zip(expected) {
            close(*actual, expected);
        }

        let b = DenseMatrix::<f32>::from_list(vec![
            vec![1.1, 2.2, 3.3],
            vec![4.4, 1.1, 2.2],
            vec![3.3, 4.4, 5.5],
        ]);
        close(b.determinant().unwrap(), 10.648);
        assert_eq!(b.rank().unwrap(), 3);

        let singular = DenseMatrix::<f32>::from_list(vec![
            vec![1.0, -2.0, 3.0],
            vec![2.0, -3.0, 5.0],
            vec![1.0, 1.0, 0.0],
        ]);
        assert_eq!(singular.inverse(), Err(MatrixError::NotInvertible));
    }
}
