use crate::error::Result;

/// Value-type matrix API. Every operation returns a new matrix or scalar and
/// leaves `self` untouched.
///
/// Cells are addressed as `(column, row)`.
pub trait Matrix<T>
where
    Self: Sized,
{
    fn from_list(lines: Vec<Vec<T>>) -> Self;
    fn to_list(&self) -> Vec<Vec<T>>;

    fn identity(n: usize) -> Self;
    fn transpose(&self) -> Self;
    fn trace(&self) -> Result<T>;
    fn determinant(&self) -> Result<T>;
    fn rank(&self) -> Result<usize>;
    fn nullity(&self) -> Result<usize>;
    fn inverse(&self) -> Result<Self>;
    fn at(&self, column: usize, row: usize) -> T;
}
