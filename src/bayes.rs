//! Closed-form Bayesian polynomial curve fitting
//!
//! With a zero-mean isotropic Gaussian prior of precision `α` on the weights, and Gaussian
//! noise of precision `β` on the targets, the predictive distribution at a query point `x` is
//! Gaussian with
//!
//! ```text
//! S⁻¹     = αI + β Σ φ(x_n) φ(x_n)ᵗ
//! mean(x) = β φ(x)ᵗ S Σ φ(x_n) t_n
//! var(x)  = 1/β + φ(x)ᵗ S φ(x)
//! ```
//!
//! [`BayesianFit`] factorizes `S⁻¹` once, solves for the posterior mean direction
//! `m = S Σ φ(x_n) t_n` once, and then answers any number of queries with one
//! solve against the stored factor each. `S` itself is only formed on request.
//!
//! The predictive mean is exactly a ridge fit with `λ = α/β`; the variance is what the Bayesian
//! treatment adds on top. `α` and a ridge strength play the same structural role but are not
//! interchangeable numerically.
use nalgebra::{Cholesky, DMatrix, DVector, Dyn};

use crate::{
    basis::MonomialBasis,
    error::{Error, Result},
    value::{Linspace, Value},
    Polynomial,
};

/// Posterior predictive distribution at a single query point.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Prediction<T: Value = f64> {
    /// The query point.
    pub x: T,

    /// Predictive mean `m(x)`.
    pub mean: T,

    /// Predictive variance `s²(x)`, never below `1/β`.
    pub variance: T,
}
impl<T: Value> Prediction<T> {
    /// The prediction as a `[x, mean, variance]` table row.
    #[must_use]
    pub fn row(&self) -> [T; 3] {
        [self.x, self.mean, self.variance]
    }

    /// Predictive standard deviation `s(x)`, the half-width of the usual one-sigma band.
    #[must_use]
    pub fn std_dev(&self) -> T {
        self.variance.sqrt()
    }
}

/// A Bayesian polynomial regression posterior, ready to answer predictive queries.
///
/// # Example
/// ```
/// # use polyreg::BayesianFit;
/// let fit = BayesianFit::<f64>::from_columns(&[0.0, 1.0], &[0.0, 1.0], 1.0, 1.0, 1).unwrap();
/// let p = fit.predict(0.5);
/// assert!((p.mean - 0.4).abs() < 1e-12);
/// assert!((p.variance - 1.35).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BayesianFit<T: Value = f64> {
    alpha: T,
    beta: T,
    degree: usize,
    data_points: usize,
    precision: DMatrix<T>,
    cholesky: Cholesky<T, Dyn>,
    m: DVector<T>,
}
impl<T: Value> BayesianFit<T> {
    /// Builds the posterior for `(x, t)` pairs.
    ///
    /// # Parameters
    /// - `data`: Training pairs; must not be empty.
    /// - `alpha`: Prior precision on the weights, `α > 0`.
    /// - `beta`: Noise precision of the targets, `β > 0`.
    /// - `degree`: Polynomial degree `M`.
    ///
    /// # Errors
    /// - `Error::NoData`: `data` is empty.
    /// - `Error::InvalidHyperparameter`: `alpha` or `beta` is not finite and strictly positive.
    /// - `Error::SingularMatrix`: `S⁻¹` is not positive definite in floating point, so it cannot be factorized.
    pub fn new(data: &[(T, T)], alpha: T, beta: T, degree: usize) -> Result<Self> {
        let x: Vec<T> = data.iter().map(|&(x, _)| x).collect();
        let t: Vec<T> = data.iter().map(|&(_, t)| t).collect();
        Self::fit(&x, &t, alpha, beta, degree)
    }

    /// Builds the posterior from separate input and target columns.
    ///
    /// # Errors
    /// - `Error::LengthMismatch`: `x_train` and `t_train` differ in length. Checked before anything else.
    /// - Otherwise as [`BayesianFit::new`].
    pub fn from_columns(x_train: &[T], t_train: &[T], alpha: T, beta: T, degree: usize) -> Result<Self> {
        if x_train.len() != t_train.len() {
            return Err(Error::LengthMismatch {
                x: x_train.len(),
                t: t_train.len(),
            });
        }
        Self::fit(x_train, t_train, alpha, beta, degree)
    }

    fn fit(x: &[T], t: &[T], alpha: T, beta: T, degree: usize) -> Result<Self> {
        if x.is_empty() {
            return Err(Error::NoData);
        }
        if !alpha.is_real() || alpha <= T::zero() {
            return Err(Error::hyperparameter("alpha", alpha));
        }
        if !beta.is_real() || beta <= T::zero() {
            return Err(Error::hyperparameter("beta", beta));
        }

        let n = x.len();
        let basis = MonomialBasis::<T>::new();
        let k = basis.k(degree);
        log::debug!("Bayesian fit: n={n}, degree={degree}, alpha={alpha:e}, beta={beta:e}");

        // D×N, one column per sample
        let phi = basis.feature_matrix(x.iter().copied(), degree);
        let rhs = &phi * DVector::from_column_slice(t);

        let mut precision = &phi * phi.transpose() * beta;
        let data_scale = precision.diagonal().max();
        if alpha < T::epsilon() * data_scale {
            log::warn!(
                "alpha={alpha:e} is negligible next to the data precision ({data_scale:e}); the prior has no numerical effect"
            );
        }
        for i in 0..k {
            precision[(i, i)] += alpha;
        }

        let cholesky = Cholesky::new(precision.clone()).ok_or(Error::SingularMatrix { n, k })?;
        let m = cholesky.solve(&rhs);
        if m.iter().any(|v| !v.is_real()) {
            return Err(Error::Algebra("Non-finite value in posterior mean"));
        }

        Ok(Self {
            alpha,
            beta,
            degree,
            data_points: n,
            precision,
            cholesky,
            m,
        })
    }

    /// Prior precision `α`.
    #[must_use]
    pub fn alpha(&self) -> T {
        self.alpha
    }

    /// Noise precision `β`.
    #[must_use]
    pub fn beta(&self) -> T {
        self.beta
    }

    /// Polynomial degree `M`.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of training points the posterior was built from.
    #[must_use]
    pub fn data_points(&self) -> usize {
        self.data_points
    }

    /// The posterior precision matrix `S⁻¹ = αI + βΦΦᵗ`, `D×D`.
    #[must_use]
    pub fn posterior_precision(&self) -> &DMatrix<T> {
        &self.precision
    }

    /// The posterior covariance `S`, computed from the stored factorization.
    #[must_use]
    pub fn posterior_covariance(&self) -> DMatrix<T> {
        self.cholesky.inverse()
    }

    /// Coefficients of the predictive-mean polynomial, `β S Φt`, constant term first.
    #[must_use]
    pub fn mean_weights(&self) -> Vec<T> {
        self.m.iter().map(|&m| m * self.beta).collect()
    }

    /// The predictive mean as a [`Polynomial`], for evaluating or printing the mean curve.
    ///
    /// # Errors
    /// Never fails for a successfully built fit; the result is fallible only because [`Polynomial`] construction is.
    pub fn as_polynomial(&self) -> Result<Polynomial<'static, T>> {
        Polynomial::from_coefficients(self.mean_weights())
    }

    /// Posterior predictive distribution at `x`.
    ///
    /// One solve against the stored Cholesky factor per call; the fit itself is not repeated.
    pub fn predict(&self, x: T) -> Prediction<T> {
        let phi = MonomialBasis::<T>::new().feature_vector(x, self.degree);
        let s = self.cholesky.solve(&phi);

        // φᵗSφ ≥ 0 up to rounding. Overflow of either sign means the band is unbounded
        let spread = phi.dot(&s);
        let spread = if Value::is_real(&spread) {
            if spread < T::zero() {
                T::zero()
            } else {
                spread
            }
        } else if num_traits::float::FloatCore::is_nan(spread) {
            spread
        } else {
            T::infinity()
        };

        Prediction {
            x,
            mean: self.beta * phi.dot(&self.m),
            variance: spread + T::one() / self.beta,
        }
    }

    /// Posterior predictive distribution at each query point, in order.
    pub fn predict_many(&self, queries: impl IntoIterator<Item = T>) -> Vec<Prediction<T>> {
        queries.into_iter().map(|x| self.predict(x)).collect()
    }

    /// Posterior predictive distribution at `n` evenly spaced points over `[start, end]`.
    pub fn predict_linspace(&self, start: T, end: T, n: usize) -> Vec<Prediction<T>> {
        self.predict_many(Linspace::new(start, end, n))
    }
}

/// Fits the posterior and evaluates it at every query point, in one call.
///
/// Returns one [`Prediction`] per query point, in the same order. Use [`Prediction::row`] for the
/// `(x, mean, variance)` table form.
///
/// # Errors
/// As [`BayesianFit::from_columns`].
///
/// # Example
/// ```
/// # use polyreg::bayes::fit_predict;
/// let rows = fit_predict::<f64>(&[0.0, 0.5, 1.0], &[0.0, 1.0], &[0.0, 1.0], 1.0, 1.0, 1).unwrap();
/// assert_eq!(rows.len(), 3);
/// assert!((rows[2].mean - 0.6).abs() < 1e-12);
/// ```
pub fn fit_predict<T: Value>(
    query_points: &[T],
    x_train: &[T],
    t_train: &[T],
    alpha: T,
    beta: T,
    degree: usize,
) -> Result<Vec<Prediction<T>>> {
    let fit = BayesianFit::from_columns(x_train, t_train, alpha, beta, degree)?;
    Ok(fit.predict_many(query_points.iter().copied()))
}

/// Sequential learning: refits on the first `1, 2, …, N` points of `data`, in the order given.
///
/// Returns one predictive table over `query_points` per prefix, so `result[i]` uses `i + 1` points.
/// Shuffle `data` beforehand to see the posterior tighten in random order.
///
/// # Errors
/// `Error::NoData` if `data` is empty; otherwise as [`BayesianFit::new`].
pub fn sequential<T: Value>(
    data: &[(T, T)],
    query_points: &[T],
    alpha: T,
    beta: T,
    degree: usize,
) -> Result<Vec<Vec<Prediction<T>>>> {
    if data.is_empty() {
        return Err(Error::NoData);
    }

    (1..=data.len())
        .map(|n| {
            let fit = BayesianFit::new(&data[..n], alpha, beta, degree)?;
            Ok(fit.predict_many(query_points.iter().copied()))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{assert_all_close, assert_close, LeastSquaresFit};

    fn two_point_fit() -> BayesianFit {
        BayesianFit::from_columns(&[0.0, 1.0], &[0.0, 1.0], 1.0, 1.0, 1).unwrap()
    }

    #[test]
    fn test_two_point_predictions() {
        let fit = two_point_fit();

        let p = fit.predict(0.5);
        assert_close!(p.mean, 0.4, tol = 1e-12);
        assert_close!(p.variance, 1.35, tol = 1e-12);

        let p = fit.predict(0.0);
        assert_close!(p.mean, 0.2, tol = 1e-12);
        assert_close!(p.variance, 1.4, tol = 1e-12);

        let p = fit.predict(1.0);
        assert_close!(p.mean, 0.6, tol = 1e-12);
        assert_close!(p.variance, 1.6, tol = 1e-12);
    }

    #[test]
    fn test_posterior_matrices() {
        let fit = two_point_fit();
        let sinv = fit.posterior_precision();
        assert_eq!(sinv.shape(), (2, 2));
        assert_all_close!(sinv.as_slice(), [3.0, 1.0, 1.0, 2.0]);

        // S = 1/5 [[2, -1], [-1, 3]]
        let s = fit.posterior_covariance();
        assert_all_close!(s.as_slice(), [0.4, -0.2, -0.2, 0.6], tol = 1e-12);

        assert_all_close!(fit.mean_weights(), [0.2, 0.4], tol = 1e-12);
        let mean = fit.as_polynomial().unwrap();
        assert_close!(mean.y(0.5), 0.4, tol = 1e-12);
    }

    #[test]
    fn test_prediction_row() {
        let p = two_point_fit().predict(0.5);
        let row = p.row();
        assert_eq!(row[0], 0.5);
        assert_eq!(row[1], p.mean);
        assert_eq!(row[2], p.variance);
        assert_close!(p.std_dev() * p.std_dev(), p.variance, tol = 1e-12);
    }

    #[test]
    fn test_variance_floor() {
        let data: Vec<(f64, f64)> = (0..12)
            .map(|i| {
                let x = f64::from(i) / 11.0;
                (x, (std::f64::consts::TAU * x).sin())
            })
            .collect();
        let beta = 11.1;
        let fit = BayesianFit::new(&data, 5e-3, beta, 9).unwrap();
        for p in fit.predict_linspace(-0.25, 1.25, 61) {
            assert!(p.variance >= 1.0 / beta, "x = {}", p.x);
        }
    }

    #[test]
    fn test_far_queries_keep_their_uncertainty() {
        let beta: f64 = 1.0;
        let fit = BayesianFit::from_columns(&[0.0, 1.0], &[0.0, 1.0], 1.0, beta, 9).unwrap();

        for q in [1e20, 1e35, 1e200] {
            let p = fit.predict(q);
            assert!(
                p.variance.is_nan() || p.variance > 1.0 / beta,
                "x = {q}: mean {} reported with variance {}",
                p.mean,
                p.variance
            );
        }

        let p = fit.predict(10.0);
        assert!(p.variance.is_finite() && p.variance > 1.0 / beta);
    }

    #[test]
    fn test_negligible_alpha_matches_least_squares() {
        let data = [(0.0, 0.1), (1.0, 1.2), (2.0, 1.9), (3.0, 3.1)];
        let fit = BayesianFit::new(&data, 1e-300, 1.0, 1).unwrap();
        let ls = LeastSquaresFit::new(&data[..], 1).unwrap();

        assert_all_close!(fit.mean_weights(), ls.coefficients(), tol = 1e-9);
    }

    #[test]
    fn test_mean_matches_ridge() {
        let data = vec![(0.0, 0.2), (0.2, 0.8), (0.4, 0.7), (0.6, -0.5), (0.8, -0.9), (1.0, 0.1)];
        let (alpha, beta) = (5e-3, 11.1);
        let bayes = BayesianFit::new(&data, alpha, beta, 3).unwrap();
        let ridge = LeastSquaresFit::new_regularized(&data, 3, alpha / beta).unwrap();
        assert_all_close!(bayes.mean_weights(), ridge.coefficients(), tol = 1e-8);
    }

    #[test]
    fn test_preconditions() {
        let err = BayesianFit::from_columns(&[0.0, 1.0], &[0.0], 1.0, 1.0, 1).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { x: 2, t: 1 }));

        let err = BayesianFit::<f64>::new(&[], 1.0, 1.0, 1).unwrap_err();
        assert!(matches!(err, Error::NoData));

        let data = [(0.0, 0.0), (1.0, 1.0)];
        for alpha in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = BayesianFit::new(&data, alpha, 1.0, 1).unwrap_err();
            assert!(matches!(err, Error::InvalidHyperparameter { name: "alpha", .. }));
        }
        for beta in [0.0, -2.0, f64::NAN] {
            let err = BayesianFit::new(&data, 1.0, beta, 1).unwrap_err();
            assert!(matches!(err, Error::InvalidHyperparameter { name: "beta", .. }));
        }
    }

    #[test]
    fn test_fit_predict() {
        let rows = fit_predict(&[0.0, 0.5, 1.0], &[0.0, 1.0], &[0.0, 1.0], 1.0, 1.0, 1).unwrap();
        let means: Vec<_> = rows.iter().map(|p| p.mean).collect();
        assert_all_close!(means, [0.2, 0.4, 0.6], tol = 1e-12);

        let pairs = BayesianFit::new(&[(0.0, 0.0), (1.0, 1.0)], 1.0, 1.0, 1).unwrap();
        assert_eq!(pairs.predict(0.5), rows[1]);

        assert!(fit_predict::<f64>(&[], &[0.0, 1.0], &[0.0, 1.0], 1.0, 1.0, 1)
            .unwrap()
            .is_empty());
        assert!(fit_predict(&[0.5], &[0.0], &[0.0, 1.0], 1.0, 1.0, 1).is_err());
    }

    #[test]
    fn test_sequential() {
        let data = vec![(0.9, -0.6), (0.1, 0.6), (0.5, 0.0), (0.3, 1.0)];
        let query = [0.0, 0.5, 1.0];
        let frames = sequential(&data, &query, 5e-3, 11.1, 3).unwrap();
        assert_eq!(frames.len(), 4);
        assert!(frames.iter().all(|f| f.len() == 3));

        // Last frame is a fit on everything
        let full = BayesianFit::new(&data, 5e-3, 11.1, 3).unwrap();
        assert_eq!(frames[3], full.predict_many(query));

        // More data, less uncertainty at a point we have observed
        assert!(frames[3][1].variance < frames[0][1].variance);

        assert!(matches!(sequential::<f64>(&[], &query, 1.0, 1.0, 1), Err(Error::NoData)));
    }
}
