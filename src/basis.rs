//! Monomial basis functions and design matrices
//!
//! Both fitting paths express a polynomial of degree `M` in the monomial basis
//!
//! ```text
//! φ(x) = [1, x, x², …, x^M]
//! ```
//!
//! and build a Vandermonde-style design matrix from it. The two paths use the matrix in
//! opposite orientations:
//! - [`MonomialBasis::design_matrix`] is `N×D`, one row per sample, used by least squares.
//! - [`MonomialBasis::feature_matrix`] is `D×N`, one column per sample, used by the Bayesian fit.
//!
//! Powers are accumulated by repeated multiplication rather than `powi`, so row `n` holds
//! exactly `x_n`, `x_n·x_n`, `x_n·x_n·x_n`, …
use nalgebra::{DMatrix, DVector, MatrixViewMut};

use crate::{
    display::{self, PolynomialDisplay, Sign, DEFAULT_PRECISION},
    value::Value,
};

/// Standard (non-normalized) monomial basis for polynomials.
///
/// ```text
/// 1, x, x², …, xⁿ
/// ```
///
/// It is **not normalized**, so fits with high degree over wide x ranges produce
/// badly conditioned systems. The textbook datasets live on `[0, 1]`, where this is not a concern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonomialBasis<T: Value = f64>(std::marker::PhantomData<T>);
impl<T: Value> MonomialBasis<T> {
    /// Creates a new monomial basis.
    #[must_use]
    pub const fn new() -> Self {
        Self(std::marker::PhantomData)
    }

    /// Number of basis functions for a polynomial of the given degree (`degree + 1`).
    #[inline(always)]
    #[must_use]
    pub const fn k(&self, degree: usize) -> usize {
        degree + 1
    }

    /// Populates a row (or column) of a Vandermonde matrix with this basis evaluated at `x`.
    ///
    /// All entries of `row` are overwritten, starting with the constant term.
    /// Works for any contiguous view, so it fills rows of an `N×D` matrix and columns of a `D×N` one alike.
    #[inline(always)]
    pub fn fill_matrix_row<R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
        &self,
        x: T,
        mut row: MatrixViewMut<T, R, C, RS, CS>,
    ) {
        let mut power = T::one();
        for j in 0..row.len() {
            row[j] = power;
            power *= x;
        }
    }

    /// Evaluates the jth basis function, `x^j`.
    #[inline(always)]
    pub fn solve_function(&self, j: usize, x: T) -> T {
        match j {
            0 => T::one(),
            1 => x,
            _ => (1..j).fold(x, |acc, _| acc * x),
        }
    }

    /// Builds the `N×D` design matrix, `V[n, d] = x_n^d`.
    ///
    /// Column 0 is all ones.
    pub fn design_matrix(&self, x: impl ExactSizeIterator<Item = T>, degree: usize) -> DMatrix<T> {
        let k = self.k(degree);
        let mut matrix = DMatrix::zeros(x.len(), k);
        for (row, x) in matrix.row_iter_mut().zip(x) {
            self.fill_matrix_row(x, row);
        }
        matrix
    }

    /// Builds the `D×N` feature matrix, `Φ[i, n] = x_n^i`.
    ///
    /// This is the transpose of [`MonomialBasis::design_matrix`]; column `n` is `φ(x_n)`.
    pub fn feature_matrix(&self, x: impl ExactSizeIterator<Item = T>, degree: usize) -> DMatrix<T> {
        let k = self.k(degree);
        let mut matrix = DMatrix::zeros(k, x.len());
        for (column, x) in matrix.column_iter_mut().zip(x) {
            self.fill_matrix_row(x, column);
        }
        matrix
    }

    /// The feature vector `φ(x) = [1, x, …, x^degree]`.
    pub fn feature_vector(&self, x: T, degree: usize) -> DVector<T> {
        let mut vector = DVector::zeros(self.k(degree));
        self.fill_matrix_row(x, vector.column_mut(0));
        vector
    }
}
impl<T: Value> Default for MonomialBasis<T> {
    fn default() -> Self {
        Self::new()
    }
}
impl<T: Value> PolynomialDisplay<T> for MonomialBasis<T> {
    fn format_term(&self, degree: i32, coef: T) -> Option<display::Term> {
        let sign = Sign::from_coef(coef);

        let base = display::format_variable("x", degree);
        let coef = display::format_coefficient(coef, degree, DEFAULT_PRECISION)?;

        let body = format!("{coef}{base}");
        Some(display::Term::new(sign, body))
    }
}
