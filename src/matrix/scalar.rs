use num_traits::{One, Zero};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Element kinds the matrix engine runs on.
///
/// Zero and one tests are exact comparisons against the additive and
/// multiplicative identities, never tolerance based.
pub trait Scalar:  // Avoid repeating all the traits
    Clone
    + Zero
    + One
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + std::iter::Sum<Self>
    + std::fmt::Display
    + std::fmt::Debug
    + Send
    + Sync
{
    #[inline(always)]
    fn is_exact_one(&self) -> bool {
        *self == Self::one()
    }

    #[inline(always)]
    fn reciprocal(&self) -> Self {
        Self::one() / self.clone()
    }
}

impl<T> Scalar for T where
    T: Clone
        + Zero
        + One
        + PartialEq
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + Neg<Output = T>
        + std::iter::Sum<T>
        + std::fmt::Display
        + std::fmt::Debug
        + Send
        + Sync
{
}
