//! Error metrics and descriptive statistics for evaluating polynomial fits
//!
//! # Error Functions
//! - [`sum_of_squares_error`]: `E = ½ Σ (y - t)²`, the quantity least squares minimizes.
//! - [`rms_error`]: `E_RMS = √(2E/N)`, comparable across datasets of different sizes.
//! - [`mean_squared_error`]: `Σ (y - t)² / N`.
//!
//! # Goodness of fit
//! - [`r_squared`]: Share of the target variance the model accounts for.
//! - [`residual_variance`]: Noise variance estimate corrected for the `k` fitted parameters.
//!
//! # Summaries
//! - [`mean`] and [`stddev_and_mean`], used to check generated noise.
//!
//! All functions take the observed values `y` (the targets `t`) and the predictions `y_fit`
//! as iterators, pairing them up in order. Extra elements in the longer iterator are ignored.
//!
//! # Examples
//!
//! ```rust
//! use polyreg::statistics::{r_squared, rms_error};
//!
//! let t = vec![1.0, 2.0, 3.0];
//! let y = vec![1.1, 1.9, 3.05];
//!
//! let r2 = r_squared(t.iter().copied(), y.iter().copied());
//! let e_rms = rms_error(t.into_iter(), y.into_iter());
//! assert!(r2 > 0.9 && e_rms < 0.1);
//! ```
use crate::value::Value;

/// Computes the sum-of-squares error function.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// E = ½ Σ (y_fit_i - y_i)²
/// ```
/// </div>
///
/// Returns zero for empty input.
///
/// # Example
/// ```rust
/// # use polyreg::statistics::sum_of_squares_error;
/// let e = sum_of_squares_error([1.0, 2.0].into_iter(), [0.0, 0.0].into_iter());
/// assert_eq!(e, 2.5);
/// ```
pub fn sum_of_squares_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let (total, _) = squares_with_n(y, y_fit);
    total / T::two()
}

/// Computes the root-mean-square error used to compare training and test sets of different sizes.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// E_RMS = √(2E / N)
/// where
///   E = sum-of-squares error, N = number of observations
/// ```
/// This is numerically the square root of the [`mean_squared_error`].
/// </div>
///
/// Returns NaN for empty input.
pub fn rms_error<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let (total, n) = squares_with_n(y, y_fit);
    (total / n).sqrt()
}

/// Mean of the squared residuals.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// MSE = (Σ (y_i - y_fit_i)²) / N
/// ```
/// </div>
///
/// # Example
/// ```
/// # use polyreg::statistics::mean_squared_error;
/// let mse = mean_squared_error([-1.0, -2.0].into_iter(), [1.0, 2.0].into_iter());
/// assert_eq!(mse, 10.0);
/// ```
pub fn mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let (total, n) = squares_with_n(y, y_fit);
    total / n
}

/// Estimates the noise variance σ² left after fitting `k` parameters.
///
/// On noisy sine data with a well chosen degree this lands near `sigma²`.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// σ² = Σ (y_i - y_fit_i)² / (n - k)
///   n = pairs compared, k = fitted parameters
/// ```
/// </div>
///
/// Returns zero when `n == k`, an interpolating fit.
pub fn residual_variance<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
    k: T,
) -> T {
    let (total, n) = squares_with_n(y, y_fit);
    if n == k {
        return T::zero();
    }
    total / (n - k)
}

/// Coefficient of determination.
///
/// `1` is a perfect fit and `0` is no better than predicting the mean. It goes negative for fits
/// worse than that, which high degree polynomials manage on held-out data.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// </div>
///
/// A constant `y` has `SS_tot = 0`, and gives NaN.
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let y: Vec<T> = y.collect();
    let y_mean = mean(y.iter().copied());

    let mut ss_total = T::zero();
    let mut ss_residual = T::zero();
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += Value::powi(y - y_mean, 2);
        ss_residual += Value::powi(y - y_fit, 2);
    }

    T::one() - (ss_residual / ss_total)
}

/// Arithmetic mean, NaN when empty.
///
/// ```rust
/// let m = polyreg::statistics::mean([1.0, 2.0, 3.0].into_iter());
/// assert_eq!(m, 2.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let (sum, count) = data.fold((T::zero(), T::zero()), |(sum, count), value| {
        (sum + value, count + T::one())
    });
    sum / count
}

/// Population standard deviation (divided by `N`) together with the mean.
///
/// ```rust
/// let (s, m) = polyreg::statistics::stddev_and_mean([1.0, 2.0, 3.0].into_iter());
/// assert_eq!(m, 2.0);
/// assert!((s - (2.0f64 / 3.0).sqrt()).abs() < 1e-15);
/// ```
pub fn stddev_and_mean<T: Value>(data: impl Iterator<Item = T>) -> (T, T) {
    let data: Vec<_> = data.collect();
    let mean = mean(data.iter().copied());
    let spread = data
        .iter()
        .map(|&value| Value::powi(value - mean, 2))
        .fold(T::zero(), |acc, sq| acc + sq);

    ((spread / T::from_positive_int(data.len())).sqrt(), mean)
}

fn squares_with_n<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> (T, T) {
    let mut total = T::zero();
    let mut n = T::zero();
    for (y, y_fit) in y.zip(y_fit) {
        total += Value::powi(y - y_fit, 2);
        n += T::one();
    }
    (total, n)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::assert_close;

    #[test]
    fn sum_of_squares_halves_the_total() {
        // diffs = [1, 2, 3], squares sum to 14
        let e = sum_of_squares_error::<f64>([1.0, 2.0, 3.0].into_iter(), [0.0; 3].into_iter());
        assert_eq!(e, 7.0);
        assert_eq!(sum_of_squares_error::<f64>([].into_iter(), [].into_iter()), 0.0);
    }

    #[test]
    fn rms_matches_definition() {
        let t: [f64; 4] = [0.5, -1.0, 2.0, 0.25];
        let y = [0.0, -0.5, 1.0, 0.75];
        let e = sum_of_squares_error(t.into_iter(), y.into_iter());
        let rms = rms_error(t.into_iter(), y.into_iter());
        assert_close!(rms, (2.0 * e / 4.0).sqrt());
        assert_close!(rms, mean_squared_error(t.into_iter(), y.into_iter()).sqrt());
    }

    #[test]
    fn rms_empty_input_returns_nan() {
        assert!(rms_error::<f64>([].into_iter(), [].into_iter()).is_nan());
    }

    #[test]
    fn residual_variance_simple_case() {
        // errors: [1, 2], squared = [1, 4], sum = 5, n-k = 1
        let var = residual_variance::<f64>([1.0, 2.0].into_iter(), [0.0, 0.0].into_iter(), 1.0);
        assert_eq!(var, 5.0);

        let var = residual_variance::<f64>([1.0, 2.0].into_iter(), [1.0, 2.0].into_iter(), 2.0);
        assert_eq!(var, 0.0);
    }

    #[test]
    fn r_squared_cases() {
        let y = [1.0, 2.0, 3.0];
        assert_eq!(r_squared::<f64>(y.into_iter(), y.into_iter()), 1.0);
        assert_eq!(r_squared::<f64>(y.into_iter(), [2.0; 3].into_iter()), 0.0);
        assert_eq!(r_squared::<f64>(y.into_iter(), [10.0; 3].into_iter()), -96.0);
        assert!(r_squared::<f64>([2.0; 3].into_iter(), [2.0; 3].into_iter()).is_nan());
    }

    #[test]
    fn descriptive() {
        let (s, m) = stddev_and_mean([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter());
        assert_eq!(m, 5.0);
        assert_eq!(s, 2.0);
        assert!(mean::<f64>([].into_iter()).is_nan());
    }
}
