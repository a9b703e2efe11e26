//! Polynomial least squares, plain and ridge-regularized
//!
//! [`LeastSquaresFit`] solves the normal equations of the monomial design matrix:
//!
//! ```text
//! (VᵗV + λI) w = Vᵗt
//! ```
//!
//! with `λ = 0` for an ordinary fit. The constant term is penalized along with the rest.
//!
//! The module also carries the two chapter-level experiments built on it:
//! [`rms_sweep`] (training and test error for every degree) and [`coefficient_table`]
//! (the coefficients of one degree under several ridge strengths).
use std::borrow::Cow;

use nalgebra::{DMatrix, DVector};

use crate::{
    basis::MonomialBasis,
    error::{Error, Result},
    statistics,
    value::{CoordExt, Value},
    Polynomial,
};

/// A polynomial least-squares fit of a dataset.
///
/// Stores the data it was fitted on (borrowed if possible) and the resulting [`Polynomial`].
///
/// # How it works
/// - Builds the `N×D` Vandermonde matrix `V`, `V[n, d] = x_n^d`, with `D = degree + 1`.
/// - Reduces it to the `D×D` normal equations `A = VᵗV`, `b = Vᵗt`.
/// - Adds `λ` to the diagonal of `A` when a ridge strength is given.
/// - Solves `A w = b` with a dense LU factorization.
///
/// # Example
/// ```
/// # use polyreg::LeastSquaresFit;
/// let data = &[(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)];
/// let fit = LeastSquaresFit::new(data, 2).unwrap();
/// assert_eq!(fit.coefficients().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresFit<'data, T: Value = f64> {
    data: Cow<'data, [(T, T)]>,
    ridge_lambda: T,
    function: Polynomial<'static, T>,
}
impl<'data, T: Value> LeastSquaresFit<'data, T> {
    /// Turns a dataset into its design matrix and target vector.
    fn create_matrix(data: &[(T, T)], degree: usize) -> (DMatrix<T>, DVector<T>) {
        let basis = MonomialBasis::<T>::new();
        let v = basis.design_matrix(data.iter().map(|&(x, _)| x), degree);
        let t = DVector::from_iterator(data.len(), data.y_iter());
        (v, t)
    }

    /// Reduce the n by k / 1 by n into a k by k and k by 1 system.
    fn normal_equations(v: &DMatrix<T>, t: &DVector<T>) -> (DMatrix<T>, DVector<T>) {
        let vt = v.transpose();
        (&vt * v, vt * t)
    }

    /// Solves the square system using LU decomposition.
    fn solve_matrix(a: DMatrix<T>, b: &DVector<T>, n: usize) -> Result<Vec<T>> {
        let k = a.nrows();
        let w = a.lu().solve(b).ok_or(Error::SingularMatrix { n, k })?;
        let coefficients: Vec<T> = w.data.into();

        // Make sure the coefficients are valid
        if coefficients.iter().any(|c| !c.is_real()) {
            return Err(Error::Algebra("Non-finite value in coefficients"));
        }

        Ok(coefficients)
    }

    /// Creates an ordinary (unregularized) least-squares fit of the given degree.
    ///
    /// Equivalent to [`LeastSquaresFit::new_regularized`] with `ridge_lambda = 0`.
    ///
    /// # Errors
    /// - `Error::NoData`: `data` is empty.
    /// - `Error::SingularMatrix`: `VᵗV` is not invertible, for example when every `x` is the same.
    /// - `Error::Algebra`: the solution contains non-finite values.
    ///
    /// # Example
    /// ```
    /// # use polyreg::LeastSquaresFit;
    /// // y = 1 + 2x
    /// let data: Vec<(f64, f64)> = vec![(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)];
    /// let fit = LeastSquaresFit::new(&data, 1).unwrap();
    /// let y = fit.y(3.0);
    /// assert!((y - 7.0).abs() < 1e-9);
    /// ```
    pub fn new(data: impl Into<Cow<'data, [(T, T)]>>, degree: usize) -> Result<Self> {
        Self::new_regularized(data, degree, T::zero())
    }

    /// Creates a ridge-regularized least-squares fit of the given degree.
    ///
    /// # Parameters
    /// - `data`: Slice of `(x, t)` points to fit.
    /// - `degree`: Polynomial degree `M`; the fit has `M + 1` coefficients.
    /// - `ridge_lambda`: Penalty `λ ≥ 0` on the squared norm of **all** coefficients, including the constant term.
    ///
    /// <div class="warning">
    ///
    /// **Technical Details**
    ///
    /// Minimizes the regularized sum-of-squares error
    /// ```math
    /// Ẽ(w) = ½ Σ (y(x_n, w) - t_n)² + λ/2 ‖w‖²
    /// ```
    /// whose minimizer satisfies `(VᵗV + λI) w = Vᵗt`.
    ///
    /// Without regularization, `degree ≥ N` leaves `VᵗV` rank deficient. The fit is still attempted,
    /// and a warning is logged. Even when `VᵗV` is technically invertible, a badly conditioned
    /// system gives unstable coefficients; a small `λ` is the remedy.
    /// </div>
    ///
    /// # Errors
    /// - `Error::NoData`: `data` is empty.
    /// - `Error::InvalidHyperparameter`: `ridge_lambda` is negative or not finite.
    /// - `Error::SingularMatrix`: the regularized system is not invertible.
    /// - `Error::Algebra`: the solution contains non-finite values.
    ///
    /// # Example
    /// ```
    /// # use polyreg::LeastSquaresFit;
    /// let data = vec![(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)];
    /// let fit = LeastSquaresFit::new_regularized(&data, 5, (-7.0f64).exp()).unwrap();
    /// assert_eq!(fit.degree(), 5);
    /// ```
    pub fn new_regularized(
        data: impl Into<Cow<'data, [(T, T)]>>,
        degree: usize,
        ridge_lambda: T,
    ) -> Result<Self> {
        let data: Cow<_> = data.into();

        if data.is_empty() {
            return Err(Error::NoData);
        }
        if !ridge_lambda.is_real() || ridge_lambda < T::zero() {
            return Err(Error::hyperparameter("ridge_lambda", ridge_lambda));
        }

        let n = data.len();
        if degree >= n && ridge_lambda.is_zero() {
            log::warn!(
                "Fitting degree {degree} to {n} points without regularization; the system is rank deficient"
            );
        }
        log::debug!("Least squares fit: n={n}, degree={degree}, lambda={ridge_lambda:e}");

        let (v, t) = Self::create_matrix(&data, degree);
        let (mut a, b) = Self::normal_equations(&v, &t);
        if ridge_lambda > T::zero() {
            for i in 0..a.nrows() {
                a[(i, i)] += ridge_lambda;
            }
        }

        let coefficients = Self::solve_matrix(a, &b, n)?;
        let function = Polynomial::from_coefficients(coefficients)?;

        Ok(Self {
            data,
            ridge_lambda,
            function,
        })
    }

    /// Returns an owned version of this fit, with a full copy of the data.
    #[must_use]
    pub fn to_owned(&self) -> LeastSquaresFit<'static, T> {
        LeastSquaresFit {
            data: Cow::Owned(self.data.to_vec()),
            ridge_lambda: self.ridge_lambda,
            function: self.function.clone(),
        }
    }

    /// Returns the data this fit was computed from.
    #[must_use]
    pub fn data(&self) -> &[(T, T)] {
        &self.data
    }

    /// The ridge strength used, zero for an ordinary fit.
    #[must_use]
    pub fn ridge_lambda(&self) -> T {
        self.ridge_lambda
    }

    /// The degree of the fitted polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.function.degree()
    }

    /// The fitted coefficients in ascending power, `w₀` first. Always `degree + 1` long.
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        self.function.coefficients()
    }

    /// Returns the fitted polynomial.
    ///
    /// # Example
    /// ```
    /// # use polyreg::LeastSquaresFit;
    /// let data = &[(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)];
    /// let fit = LeastSquaresFit::new(data, 2).unwrap();
    /// let y = fit.as_polynomial().y(10.0); // can evaluate outside original x-range
    /// ```
    #[must_use]
    pub fn as_polynomial(&self) -> &Polynomial<'static, T> {
        &self.function
    }

    /// Consumes the fit, keeping only the fitted polynomial.
    #[must_use]
    pub fn into_polynomial(self) -> Polynomial<'static, T> {
        self.function
    }

    /// Evaluates the fitted polynomial at `x`.
    pub fn y(&self, x: T) -> T {
        self.function.y(x)
    }

    /// Evaluates the fitted polynomial at multiple x-values, returning `(x, y)` pairs.
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<(T, T)> {
        self.function.solve(x)
    }

    /// The fitted values at each x of the source data.
    #[must_use]
    pub fn solution(&self) -> Vec<(T, T)> {
        self.function.solve(self.data.x_iter())
    }

    /// Computes the residuals `t_n - y(x_n)` of the fit, as `(x, residual)` pairs.
    #[must_use]
    pub fn residuals(&self) -> Vec<(T, T)> {
        self.data
            .iter()
            .map(|&(x, t)| (x, t - self.function.y(x)))
            .collect()
    }

    /// The unregularized sum-of-squares error `E = ½ Σ (y(x_n) - t_n)²` on the source data.
    ///
    /// See [`statistics::sum_of_squares_error`].
    #[must_use]
    pub fn sum_of_squares_error(&self) -> T {
        let y_fit = self.data.x_iter().map(|x| self.function.y(x));
        statistics::sum_of_squares_error(self.data.y_iter(), y_fit)
    }

    /// Root-mean-square error `√(2E/N)` on the source data (the training error).
    #[must_use]
    pub fn rms_error(&self) -> T {
        self.function.rms_error(&self.data)
    }

    /// Root-mean-square error of the fitted polynomial against another dataset (such as a test set).
    #[must_use]
    pub fn rms_error_against(&self, data: &[(T, T)]) -> T {
        self.function.rms_error(data)
    }

    /// R² of the fit against its source data.
    ///
    /// See [`statistics::r_squared`].
    #[must_use]
    pub fn r_squared(&self) -> T {
        self.function.r_squared(&self.data)
    }

    /// Returns a human-readable string of the polynomial equation, such as `y(x) = 0.40x + 0.20`.
    #[must_use]
    pub fn equation(&self) -> String {
        self.function.equation()
    }

    /// Returns a summary of the fit that can be serialized.
    #[must_use]
    pub fn properties(&self) -> FitProperties<T> {
        FitProperties {
            degree: self.degree(),
            data_points: self.data.len(),
            ridge_lambda: self.ridge_lambda,
            coefficients: self.coefficients().to_vec(),
            sum_of_squares_error: self.sum_of_squares_error(),
            rms_error: self.rms_error(),
            r_squared: self.r_squared(),
        }
    }
}

impl<T: Value> AsRef<Polynomial<'static, T>> for LeastSquaresFit<'_, T> {
    fn as_ref(&self) -> &Polynomial<'static, T> {
        &self.function
    }
}

impl<T: Value> std::fmt::Display for LeastSquaresFit<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.function)
    }
}

/// A set of diagnostic properties for a least-squares fit.
///
/// Can be serialized to JSON or other formats.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct FitProperties<T: Value> {
    /// The degree of the fitted polynomial.
    pub degree: usize,

    /// The number of data points used in the fit.
    pub data_points: usize,

    /// Ridge strength, zero for an ordinary fit.
    pub ridge_lambda: T,

    /// The coefficients of the fitted polynomial, constant term first.
    pub coefficients: Vec<T>,

    /// Sum-of-squares error on the training data.
    pub sum_of_squares_error: T,

    /// Root-mean-square error on the training data.
    pub rms_error: T,

    /// The R² value of the fit.
    pub r_squared: T,
}

/// Training and test error of a fit of one degree.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct DegreeError<T: Value> {
    /// Degree of the fitted polynomial.
    pub degree: usize,

    /// `E_RMS` on the training set.
    pub train: T,

    /// `E_RMS` on the test set.
    pub test: T,
}

/// Fits every degree from `0` to `max_degree` on `train`, and reports the RMS error on both sets.
///
/// This is the over-fitting experiment: the training error falls monotonically with degree, while the test
/// error turns back up once the polynomial starts following the noise.
///
/// # Errors
/// Fails with the first error of any individual fit. `Error::NoData` is also returned if `test` is empty.
///
/// # Example
/// ```
/// # use polyreg::fit::rms_sweep;
/// let train = vec![(0.0, 0.0), (0.25, 1.0), (0.5, 0.0), (0.75, -1.0), (1.0, 0.0)];
/// let test = vec![(0.1, 0.6), (0.4, 0.6), (0.9, -0.6)];
/// let table = rms_sweep(&train, &test, 3).unwrap();
/// assert_eq!(table.len(), 4);
/// assert!(table[3].train <= table[0].train);
/// ```
pub fn rms_sweep<T: Value>(
    train: &[(T, T)],
    test: &[(T, T)],
    max_degree: usize,
) -> Result<Vec<DegreeError<T>>> {
    if test.is_empty() {
        return Err(Error::NoData);
    }

    (0..=max_degree)
        .map(|degree| {
            let fit = LeastSquaresFit::new(train, degree)?;
            Ok(DegreeError {
                degree,
                train: fit.rms_error(),
                test: fit.rms_error_against(test),
            })
        })
        .collect()
}

/// Fits the same degree under each ridge strength, and returns the coefficient vectors in the same order.
///
/// Each entry has `degree + 1` coefficients, constant term first. Printed side by side, the columns show
/// the coefficients shrinking as `λ` grows.
///
/// # Errors
/// Fails with the first error of any individual fit.
pub fn coefficient_table<T: Value>(
    data: &[(T, T)],
    degree: usize,
    ridge_lambdas: &[T],
) -> Result<Vec<Vec<T>>> {
    ridge_lambdas
        .iter()
        .map(|&lambda| {
            let fit = LeastSquaresFit::new_regularized(data, degree, lambda)?;
            Ok(fit.coefficients().to_vec())
        })
        .collect()
}
