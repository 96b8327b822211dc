use crate::error::MatrixError;
use crate::matrix::dense::DenseMatrix;
use crate::matrix::matrix::Matrix;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyType;

impl From<MatrixError> for PyErr {
    fn from(error: MatrixError) -> PyErr {
        PyValueError::new_err(error.to_string())
    }
}

/// `DenseMatrix<f64>` as seen from Python.
#[derive(Debug, Clone)]
#[pyclass(frozen, name = "Matrix")]
pub struct PyMatrix {
    inner: DenseMatrix<f64>,
}

#[derive(FromPyObject)]
pub enum Operand {
    Matrix(PyMatrix),
    Scalar(f64),
}

impl From<DenseMatrix<f64>> for PyMatrix {
    fn from(inner: DenseMatrix<f64>) -> Self {
        PyMatrix { inner }
    }
}

#[pymethods]
impl PyMatrix {
    #[new]
    pub fn new(lines: Vec<Vec<f64>>) -> Self {
        DenseMatrix::from_list(lines).into()
    }

    #[classmethod]
    pub fn identity(_cls: &Bound<PyType>, n: usize) -> Self {
        DenseMatrix::identity(n).into()
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner.to_list()
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.columns()
    }

    #[allow(non_snake_case)]
    #[getter]
    pub fn T(&self) -> PyMatrix {
        self.inner.transpose().into()
    }

    pub fn trace(&self) -> PyResult<f64> {
        Ok(self.inner.trace()?)
    }

    pub fn determinant(&self) -> PyResult<f64> {
        Ok(self.inner.determinant()?)
    }

    pub fn rank(&self) -> PyResult<usize> {
        Ok(self.inner.rank()?)
    }

    pub fn nullity(&self) -> PyResult<usize> {
        Ok(self.inner.nullity()?)
    }

    pub fn inverse(&self) -> PyResult<PyMatrix> {
        Ok(self.inner.inverse()?.into())
    }

    pub fn __add__(&self, rhs: Operand) -> PyResult<PyMatrix> {
        Ok(match rhs {
            Operand::Matrix(m) => (&self.inner + &m.inner)?,
            Operand::Scalar(s) => &self.inner + s,
        }
        .into())
    }

    pub fn __radd__(&self, lhs: f64) -> PyMatrix {
        (lhs + &self.inner).into()
    }

    pub fn __sub__(&self, rhs: Operand) -> PyResult<PyMatrix> {
        Ok(match rhs {
            Operand::Matrix(m) => (&self.inner - &m.inner)?,
            Operand::Scalar(s) => &self.inner - s,
        }
        .into())
    }

    pub fn __rsub__(&self, lhs: f64) -> PyMatrix {
        (lhs - &self.inner).into()
    }

    pub fn __mul__(&self, rhs: Operand) -> PyResult<PyMatrix> {
        Ok(match rhs {
            Operand::Matrix(m) => (&self.inner * &m.inner)?,
            Operand::Scalar(s) => &self.inner * s,
        }
        .into())
    }

    pub fn __rmul__(&self, lhs: f64) -> PyMatrix {
        (lhs * &self.inner).into()
    }

    pub fn __truediv__(&self, rhs: f64) -> PyMatrix {
        (&self.inner / rhs).into()
    }

    pub fn __rtruediv__(&self, lhs: f64) -> PyMatrix {
        (lhs / &self.inner).into()
    }

    pub fn __neg__(&self) -> PyMatrix {
        (-&self.inner).into()
    }

    pub fn __eq__(&self, other: &PyMatrix) -> bool {
        self.inner == other.inner
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!("Matrix({:?})", self.inner.to_list())
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
