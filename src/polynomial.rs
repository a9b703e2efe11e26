//! Horner-scheme evaluation and the fitted polynomial model
//!
//! Every curve in the crate, fitted or canonical, is a monomial polynomial
//! `y(x) = Σ c_j x^j` evaluated with Horner's rule:
//!
//! ```text
//! acc = c[D-1]
//! acc = acc·x + c[i]     for i = D-2 down to 0
//! ```
//!
//! The free functions [`horner`] and [`horner_slice`] work on bare coefficient slices.
//! [`Polynomial`] wraps a coefficient vector into a model that can be evaluated, displayed and scored.
use std::{borrow::Cow, ops::RangeInclusive};

use crate::{
    basis::MonomialBasis,
    display::PolynomialDisplay,
    error::{Error, Result},
    statistics,
    value::{CoordExt, Linspace, SteppedValues, Value},
};

/// Evaluates the polynomial with the given ascending coefficients at `x`.
///
/// `coefficients[0]` is the constant term. An empty slice is the empty sum and evaluates to zero.
///
/// # Example
/// ```
/// # use polyreg::polynomial::horner;
/// // 1 + 2x + 3x²
/// assert_eq!(horner(2.0, &[1.0, 2.0, 3.0]), 17.0);
/// assert_eq!(horner(2.0, &[5.0]), 5.0);
/// ```
pub fn horner<T: Value>(x: T, coefficients: &[T]) -> T {
    let Some((&last, rest)) = coefficients.split_last() else {
        return T::zero();
    };

    rest.iter().rev().fold(last, |acc, &c| acc * x + c)
}

/// Evaluates the polynomial at every element of `x`.
///
/// The output has the same length and order as the input.
///
/// # Example
/// ```
/// # use polyreg::polynomial::horner_slice;
/// let y = horner_slice(&[0.0, 1.0, 2.0], &[1.0, 0.0, 1.0]); // 1 + x²
/// assert_eq!(y, vec![1.0, 2.0, 5.0]);
/// ```
pub fn horner_slice<T: Value>(x: &[T], coefficients: &[T]) -> Vec<T> {
    x.iter().map(|&x| horner(x, coefficients)).collect()
}

/// A polynomial in the monomial basis, `y(x) = c₀ + c₁x + … + c_M x^M`.
///
/// This is the model produced by a least-squares fit, and the predictive-mean curve of a Bayesian one.
/// It is **not tied to any dataset**, and can be evaluated for any x-value.
///
/// A polynomial always has at least one coefficient.
///
/// # Type Parameters
/// - `'a`: Lifetime for borrowed coefficients, if used.
/// - `T`: Numeric type for the coefficients, default is `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<'a, T: Value = f64> {
    coefficients: Cow<'a, [T]>,
}
impl<'a, T: Value> Polynomial<'a, T> {
    /// Creates a new polynomial from its coefficients, starting with the constant term.
    ///
    /// # Errors
    /// Returns [`Error::InvalidNumberOfParameters`] if `coefficients` is empty.
    ///
    /// # Example
    /// ```
    /// # use polyreg::Polynomial;
    /// let poly = Polynomial::from_coefficients(vec![1.0, 2.0, 3.0]).unwrap(); // 1 + 2x + 3x²
    /// assert_eq!(poly.degree(), 2);
    ///
    /// assert!(Polynomial::<f64>::from_coefficients(vec![]).is_err());
    /// ```
    pub fn from_coefficients(coefficients: impl Into<Cow<'a, [T]>>) -> Result<Self> {
        let coefficients = coefficients.into();
        if coefficients.is_empty() {
            return Err(Error::InvalidNumberOfParameters(0));
        }

        Ok(Self { coefficients })
    }

    /// Creates a new borrowed polynomial from a slice of coefficients, starting from the constant term.
    ///
    /// Usable in `const` context, which is how the [`crate::function!`] macro builds its polynomials.
    ///
    /// # Panics
    /// Panics if `coefficients` is empty.
    ///
    /// # Example
    /// ```
    /// # use polyreg::Polynomial;
    /// let poly = Polynomial::borrowed(&[1.0, 2.0, 3.0]); // 1 + 2x + 3x²
    /// assert_eq!(poly.y(2.0), 17.0);
    /// ```
    #[must_use]
    pub const fn borrowed(coefficients: &'a [T]) -> Self {
        assert!(!coefficients.is_empty(), "A polynomial needs at least one coefficient");
        Self {
            coefficients: Cow::Borrowed(coefficients),
        }
    }

    /// Converts the polynomial into an owned version, with a `'static` lifetime.
    #[must_use]
    pub fn into_owned(self) -> Polynomial<'static, T> {
        Polynomial {
            coefficients: Cow::Owned(self.coefficients.into_owned()),
        }
    }

    /// Returns the polynomial's coefficients in ascending power.
    ///
    /// For example in the expression `y(x) = 2x² - 3x + 1`;
    /// coefficients = [1.0, -3.0, 2.0]
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Returns the degree of the polynomial, one less than the number of coefficients.
    ///
    /// Leading zero coefficients still count towards the degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Evaluates the polynomial at a given x-value.
    ///
    /// <div class="warning">
    ///
    /// **Technical Details**
    ///
    /// Evaluated with [`horner`], so `D - 1` multiplications and additions for `D` coefficients:
    /// ```math
    /// y(x) = c₀ + x(c₁ + x(c₂ + … + x·c_M))
    /// ```
    /// </div>
    ///
    /// # Example
    /// ```
    /// # use polyreg::Polynomial;
    /// let poly = Polynomial::borrowed(&[1.0, 2.0, 3.0]); // 1 + 2x + 3x²
    /// let y = poly.y(2.0); // 1 + 2*2 + 3*2² = 17.0
    /// assert_eq!(y, 17.0);
    /// ```
    pub fn y(&self, x: T) -> T {
        horner(x, &self.coefficients)
    }

    /// Evaluates the polynomial at multiple x-values.
    ///
    /// # Returns
    /// A `Vec` of `(x, y)` pairs corresponding to each input value.
    ///
    /// # Example
    /// ```
    /// # use polyreg::Polynomial;
    /// let poly = Polynomial::borrowed(&[1.0, 2.0, 3.0]); // 1 + 2x + 3x²
    /// let points = poly.solve(vec![0.0, 1.0, 2.0]);
    /// assert_eq!(points, vec![(0.0, 1.0), (1.0, 6.0), (2.0, 17.0)]);
    /// ```
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<(T, T)> {
        x.into_iter().map(|x| (x, self.y(x))).collect()
    }

    /// Evaluates the polynomial over a range of x-values with a fixed step.
    ///
    /// # Example
    /// ```
    /// # use polyreg::Polynomial;
    /// let poly = Polynomial::borrowed(&[1.0, 2.0, 3.0]); // 1 + 2x + 3x²
    /// let points = poly.solve_range(0.0..=2.0, 1.0);
    /// assert_eq!(points, vec![(0.0, 1.0), (1.0, 6.0), (2.0, 17.0)]);
    ///
    /// // Non-positive steps give no points
    /// assert!(poly.solve_range(0.0..=2.0, 0.0).is_empty());
    /// ```
    pub fn solve_range(&self, range: RangeInclusive<T>, step: T) -> Vec<(T, T)> {
        self.solve(SteppedValues::new(range, step))
    }

    /// Evaluates the polynomial at `n` evenly spaced points over `[start, end]`, endpoints included.
    ///
    /// See [`Linspace`].
    pub fn solve_linspace(&self, start: T, end: T, n: usize) -> Vec<(T, T)> {
        self.solve(Linspace::new(start, end, n))
    }

    /// Calculates the R-squared value of the polynomial against the provided data.
    ///
    /// See [`statistics::r_squared`] for more details.
    pub fn r_squared(&self, data: &[(T, T)]) -> T {
        let y_fit = data.x_iter().map(|x| self.y(x));
        statistics::r_squared(data.y_iter(), y_fit)
    }

    /// Root-mean-square error of the polynomial against the provided data, `E_RMS = √(2E/N)`.
    ///
    /// See [`statistics::rms_error`] for more details.
    pub fn rms_error(&self, data: &[(T, T)]) -> T {
        let y_fit = data.x_iter().map(|x| self.y(x));
        statistics::rms_error(data.y_iter(), y_fit)
    }

    /// Scales all coefficients of the polynomial by a given factor in place.
    pub fn scale(&mut self, factor: T) {
        for c in self.coefficients.to_mut().iter_mut() {
            *c *= factor;
        }
    }

    /// Returns a human-readable string of the polynomial equation.
    ///
    /// # Example
    /// ```
    /// # use polyreg::Polynomial;
    /// let poly = Polynomial::borrowed(&[1.0, 2.0, 3.0]);
    /// assert_eq!(poly.equation(), "y(x) = 3.00x² + 2.00x + 1.00");
    /// ```
    #[must_use]
    pub fn equation(&self) -> String {
        self.to_string()
    }
}

impl<'a, T: Value> AsRef<Polynomial<'a, T>> for Polynomial<'a, T> {
    fn as_ref(&self) -> &Polynomial<'a, T> {
        self
    }
}

impl<T: Value> std::fmt::Display for Polynomial<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        MonomialBasis::<T>::new().format_polynomial(f, self.coefficients())
    }
}

impl<T: Value> std::ops::Mul<T> for Polynomial<'_, T> {
    type Output = Polynomial<'static, T>;

    fn mul(self, rhs: T) -> Self::Output {
        let mut result = self.into_owned();
        result.scale(rhs);
        result
    }
}
