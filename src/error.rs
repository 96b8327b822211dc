//! Error types for rust_linalg

use thiserror::Error;

/// Result type alias using the crate's [`MatrixError`]
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Errors raised by matrix construction and linear-algebra operations.
///
/// Shapes are reported as `(columns, rows)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// An operand was rejected before any arithmetic happened
    #[error("Invalid operand: {reason}")]
    InvalidOperand {
        /// What was wrong with it
        reason: String,
    },

    /// The operation needs a square matrix or matching dimensions
    #[error("Shape mismatch in '{op}': expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// The operation name
        op: &'static str,
        /// Required shape
        expected: (usize, usize),
        /// Actual shape
        got: (usize, usize),
    },

    /// No elementary row operation could bring the matrix closer to triangular form
    #[error("Matrix can't be made triangular")]
    NotReducible,

    /// Identity-form reduction stalled on a zero pivot
    #[error("Matrix can't be inverted")]
    NotInvertible,

    /// The elimination ran out of its step budget
    #[error("Elimination aborted after {steps} steps")]
    StepLimitExceeded {
        /// Steps performed before giving up
        steps: usize,
    },
}

impl MatrixError {
    pub(crate) fn not_square(op: &'static str, columns: usize, rows: usize) -> Self {
        MatrixError::ShapeMismatch {
            op,
            expected: (columns, columns),
            got: (columns, rows),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        MatrixError::InvalidOperand {
            reason: reason.into(),
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
