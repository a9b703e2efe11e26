//! Human-readable rendering of fitted polynomials
//!
//! Fitted models are printed as equations such as `y(x) = 0.40x + 0.20`, with
//! Unicode superscripts for the powers and scientific notation for very large
//! or very small coefficients.
//!
//! # Key Concepts
//! - **[`PolynomialDisplay`]**: How a basis renders one term; the full equation is assembled for you.
//! - **[`Term`]**: A single polynomial term with a sign and body.
//! - **[`Sign`]**: Whether a term is joined with `+` or `-`.
//!
//! # Helpers
//! - [`format_coefficient`]: Formats a numeric coefficient, skipping zeros.
//! - [`format_variable`]: Renders `x`, `x²`, `x⁻¹` and so on.
#![allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]

use crate::value::Value;

pub mod unicode;

/// Decimal places shown for each coefficient.
pub const DEFAULT_PRECISION: usize = 2;

/// Magnitudes in `[1e-3, 1e3)` print in fixed notation, the rest in scientific.
#[must_use]
pub fn default_fixed_range<T: Value>() -> Option<std::ops::Range<T>> {
    let lo = T::try_cast(1e-3).ok()?;
    let hi = T::try_cast(1e3).ok()?;
    Some(lo..hi)
}

/// Renders a coefficient vector as an equation in `x`.
///
/// A basis only decides what one term looks like. The equation itself is
/// assembled by [`PolynomialDisplay::format_polynomial`].
pub trait PolynomialDisplay<T: Value> {
    /// The term for `coef·x^degree`, or `None` when it should not appear at all.
    fn format_term(&self, degree: i32, coef: T) -> Option<Term>;

    /// Writes `y(x) = ...` into `buffer`.
    ///
    /// The output is prefixed with `"y(x) = "` and terms are written from the highest power down.
    ///
    /// # Coefficients
    /// - `coefficients[i]` is the coefficient of `x^i` (ascending order).
    /// - Zero coefficients are skipped; a polynomial with no visible terms prints as `0`.
    ///
    /// # Errors
    /// Propagates any [`std::fmt::Error`] raised by `buffer`.
    fn format_polynomial<B: std::fmt::Write>(
        &self,
        buffer: &mut B,
        coefficients: &[T],
    ) -> std::fmt::Result {
        let mut terms = coefficients
            .iter()
            .enumerate()
            .rev()
            .filter_map(|(degree, &coef)| self.format_term(degree as i32, coef));

        write!(buffer, "y(x) = ")?;
        let Some(first) = terms.next() else {
            return write!(buffer, "0");
        };

        // No leading '+'
        if first.sign == Sign::Negative {
            write!(buffer, "{}", first.sign.char())?;
        }
        write!(buffer, "{}", first.body)?;

        for term in terms {
            write!(buffer, " {} {}", term.sign.char(), term.body)?;
        }

        Ok(())
    }
}

/// How a term is joined onto the equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Joined with `+`, or written bare when leading.
    Positive,

    /// Joined with `-`.
    Negative,
}

impl Sign {
    /// Sign of a coefficient. Zero counts as positive.
    ///
    /// # Example
    /// ```
    /// # use polyreg::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// ```
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if nalgebra::RealField::is_sign_negative(&coef) {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// `+` or `-`.
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

/// A single term of a polynomial for display purposes, such as `"2.00x²"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Joining sign.
    pub sign: Sign,

    /// Magnitude and variable, without the sign.
    pub body: String,
}

impl Term {
    /// Pairs a sign with an already formatted body.
    #[must_use]
    pub fn new(sign: Sign, body: String) -> Self {
        Self { sign, body }
    }
}

/// The printed magnitude of a coefficient.
///
/// - `None` when `|coef| <= epsilon`, so the term is dropped.
/// - An empty string for a unit coefficient on a power of `x` (`x` rather than `1.00x`).
/// - Otherwise the magnitude, in the notation picked by [`default_fixed_range`].
///
/// # Example
/// ```
/// # use polyreg::display::format_coefficient;
/// assert_eq!(format_coefficient(0.0, 1, 2), None);
/// assert_eq!(format_coefficient(-2.5, 1, 2), Some("2.50".to_string()));
/// assert_eq!(format_coefficient(1e5, 1, 2), Some("1.00e5".to_string()));
/// ```
pub fn format_coefficient<T: Value>(coef: T, degree: i32, precision: usize) -> Option<String> {
    let magnitude = Value::abs(coef);
    if magnitude <= T::epsilon() {
        None
    } else if degree != 0 && magnitude.abs_sub(T::one()) <= T::epsilon() {
        Some(String::new())
    } else {
        Some(unicode::float(magnitude, default_fixed_range(), precision))
    }
}

/// `base` raised to `exp`: nothing for the constant term, `base` alone for the linear one.
///
/// ```
/// # use polyreg::display::format_variable;
/// assert_eq!(format_variable("x", 0), "");
/// assert_eq!(format_variable("x", 1), "x");
/// assert_eq!(format_variable("x", 2), "x²");
/// ```
#[must_use]
pub fn format_variable(base: &str, exp: i32) -> String {
    match exp {
        0 => String::new(),
        1 => base.to_string(),
        _ => format!("{base}{}", unicode::superscript(&exp.to_string())),
    }
}
