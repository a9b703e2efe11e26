//! Numeric types and iteration utilities for the regression kernel.
//!
//! This module defines the [`Value`] trait, which abstracts the floating-point
//! types the kernel can run on, ensuring compatibility with nalgebra's dense
//! solvers and with formatting.
//!
//! # Traits
//!
//! - [`Value`]: Extends `RealField` and `FloatCore` to provide:
//!   - `try_cast` for safe type conversion with error handling.
//!   - `powi` and `abs` without the method ambiguity of the supertraits.
//! - [`CoordExt`]: Column access for `(x, t)` datasets.
//!
//! # Iterators
//!
//! - [`SteppedValues`]: A floating-point range iterator with a fixed step.
//! - [`Linspace`]: `n` evenly spaced points including both endpoints.
//!
//! # Example
//!
//! ```rust
//! use polyreg::value::{Linspace, Value};
//!
//! // 11 points from 0.0 to 1.0
//! let grid: Vec<f64> = Linspace::new(0.0, 1.0, 11).collect();
//! assert_eq!(grid.len(), 11);
//!
//! let half = f64::try_cast(1).unwrap() / f64::two();
//! assert_eq!(half, 0.5);
//! ```
use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Numeric type for the kernel
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
{
    /// Returns the value 2.0
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Returns the absolute difference between two values.
    #[must_use]
    fn abs_sub(self, other: Self) -> Self {
        nalgebra::ComplexField::abs(self - other)
    }

    /// Returns true if the value is neither infinite nor NaN
    fn is_real(&self) -> bool {
        num_traits::float::FloatCore::is_finite(*self)
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
{
}

/// Walks `start, start + step, start + 2·step, ...` while the value stays within the range.
///
/// Values are computed from the step index rather than accumulated, so rounding does not drift.
/// A step that is not finite and positive yields nothing.
pub struct SteppedValues<T: Value> {
    range: RangeInclusive<T>,
    step: T,
    index: T,
}
impl<T: Value> SteppedValues<T> {
    /// Stepped walk over an inclusive range.
    pub fn new(range: RangeInclusive<T>, step: T) -> Self {
        Self {
            range,
            step,
            index: T::zero(),
        }
    }
}
impl<T: Value> Iterator for SteppedValues<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step <= T::zero() || !Value::is_real(&self.step) {
            return None;
        }

        let value = *self.range.start() + self.index * self.step;
        if value <= *self.range.end() {
            self.index += T::one();
            Some(value)
        } else {
            None
        }
    }
}

/// `n` evenly spaced samples over `[start, end]`, endpoints included.
///
/// The query grids for predictive curves are built with this.
/// - `n == 0` yields nothing
/// - `n == 1` yields only `start`
/// - The last sample is exactly `end`, not an accumulation of steps
#[derive(Debug, Clone)]
pub struct Linspace<T: Value> {
    start: T,
    end: T,
    n: usize,
    index: usize,
}
impl<T: Value> Linspace<T> {
    /// Creates a new evenly spaced grid of `n` points between `start` and `end`
    pub fn new(start: T, end: T, n: usize) -> Self {
        Self {
            start,
            end,
            n,
            index: 0,
        }
    }
}
impl<T: Value> Iterator for Linspace<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.n {
            return None;
        }

        let i = self.index;
        self.index += 1;

        if i + 1 == self.n && self.n > 1 {
            return Some(self.end);
        }

        let steps = T::from_positive_int(self.n.saturating_sub(1).max(1));
        let t = T::from_positive_int(i) / steps;
        Some(self.start + (self.end - self.start) * t)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n - self.index;
        (remaining, Some(remaining))
    }
}
impl<T: Value> ExactSizeIterator for Linspace<T> {}

/// Extension trait for accessing the `x` and `t` columns of a dataset.
///
/// Implemented for slices of `(x, t)` pairs, and so reachable from vectors and `Cow`s of them.
///
/// # Examples
///
/// ```
/// # use polyreg::value::CoordExt;
/// let data = vec![(1.5, -2.0), (2.0, 3.0), (0.0, 1.0)];
/// assert_eq!(data.y(), vec![-2.0, 3.0, 1.0]);
/// ```
pub trait CoordExt<T: Value> {
    /// Inputs, in dataset order.
    fn x_iter(&self) -> impl Iterator<Item = T>;

    /// Targets, in dataset order.
    fn y_iter(&self) -> impl Iterator<Item = T>;

    /// The input column.
    fn x(&self) -> Vec<T> {
        self.x_iter().collect()
    }

    /// The target column.
    fn y(&self) -> Vec<T> {
        self.y_iter().collect()
    }
}
impl<T: Value> CoordExt<T> for [(T, T)] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}

/// Zips separate `x` and `t` columns into a dataset of pairs.
///
/// # Errors
/// Returns [`Error::LengthMismatch`] if the columns differ in length.
///
/// # Example
/// ```
/// # use polyreg::value::from_columns;
/// let data = from_columns(&[0.0, 1.0], &[0.5, 1.5]).unwrap();
/// assert_eq!(data, vec![(0.0, 0.5), (1.0, 1.5)]);
///
/// assert!(from_columns(&[0.0, 1.0], &[0.5]).is_err());
/// ```
pub fn from_columns<T: Value>(x: &[T], t: &[T]) -> Result<Vec<(T, T)>> {
    if x.len() != t.len() {
        return Err(Error::LengthMismatch {
            x: x.len(),
            t: t.len(),
        });
    }

    Ok(x.iter().copied().zip(t.iter().copied()).collect())
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range() {
        let range = SteppedValues::new(0.0..=1.0, 0.25);
        let values: Vec<_> = range.collect();
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_value_range_bad_step() {
        for step in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let count = SteppedValues::new(0.0..=1.0, step).take(10).count();
            assert_eq!(count, 0, "step = {step}");
        }
    }

    #[test]
    fn test_linspace_endpoints() {
        let values: Vec<f64> = Linspace::new(0.0, 1.0, 301).collect();
        assert_eq!(values.len(), 301);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[150], 0.5);
        assert_eq!(values[300], 1.0);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert_eq!(Linspace::new(0.0, 1.0, 0).count(), 0);
        let single: Vec<f64> = Linspace::new(-0.25, 1.25, 1).collect();
        assert_eq!(single, vec![-0.25]);

        let pair: Vec<f64> = Linspace::new(-0.25, 1.25, 2).collect();
        assert_eq!(pair, vec![-0.25, 1.25]);
        assert_eq!(Linspace::new(0.0, 1.0, 7).len(), 7);
    }

    #[test]
    fn test_from_columns() {
        let data = from_columns(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(data.x(), vec![0.0, 1.0, 2.0]);
        assert_eq!(data.y(), vec![1.0, 2.0, 3.0]);

        let err = from_columns(&[0.0, 1.0], &[1.0]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { x: 2, t: 1 }));
    }
}
