#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod config;
pub mod error;
pub mod matrix {
    pub mod dense;
    pub mod elimination;
    pub mod matrix;
    pub mod ops;
    pub mod scalar;
}
pub mod rings {
    pub mod fraction;
}

#[cfg(feature = "python")]
pub mod python;

pub use config::{config, Config};
pub use error::{MatrixError, Result};
pub use matrix::dense::DenseMatrix;
pub use matrix::matrix::Matrix;
pub use matrix::scalar::Scalar;
pub use rings::fraction::Fraction;
pub use rust_decimal::Decimal;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn rust_linalg(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyMatrix>()?;
    Ok(())
}
