//! Synthetic sine-curve datasets
//!
//! The curve-fitting examples all draw their data from the same generator: inputs
//! evenly spaced on `[0, 1]` and targets from `sin(2πx)` with additive Gaussian noise.
//!
//! ```math
//! tₙ = sin(2πxₙ) + εₙ,   εₙ ~ N(0, σ²),   xₙ = n / (N - 1)
//! ```
//!
//! Fix the seed to get the same dataset on every run.
//!
//! # Example
//! ```rust
//! use polyreg::synthetic::{noisy_sine, TRAINING_SEED};
//!
//! let train = noisy_sine(10, 0.3, TRAINING_SEED).unwrap();
//! assert_eq!(train.len(), 10);
//! assert_eq!(train[9].0, 1.0);
//! ```
use rand_distr::{uniform::SampleUniform, Distribution, StandardNormal};

use crate::{error::Result, transforms::ApplyNoise, value::Linspace, value::Value};

/// Seed used for the standard 10-point training set.
pub const TRAINING_SEED: u64 = 523_456_789;

/// Seed used for the standard 100-point test set.
pub const TEST_SEED: u64 = 123_456_789;

/// Noise level of the standard datasets.
pub const DEFAULT_SIGMA: f64 = 0.3;

/// The noiseless ground truth `sin(2πx)` sampled at `n` evenly spaced points on `[0, 1]`.
///
/// # Example
/// ```rust
/// # use polyreg::synthetic::sine;
/// let curve = sine::<f64>(5);
/// assert_eq!(curve[0], (0.0, 0.0));
/// assert!((curve[1].1 - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn sine<T: Value>(n: usize) -> Vec<(T, T)> {
    let two_pi = <T as nalgebra::RealField>::two_pi();
    Linspace::new(T::zero(), T::one(), n)
        .map(|x| (x, nalgebra::ComplexField::sin(two_pi * x)))
        .collect()
}

/// A noisy sine dataset: [`sine`] with `N(0, sigma²)` added to every target.
///
/// The same `(n, sigma, seed)` always gives the same data.
///
/// # Errors
/// Returns [`crate::error::Error::InvalidHyperparameter`] if `sigma` is negative or not finite.
pub fn noisy_sine<T>(n: usize, sigma: T, seed: u64) -> Result<Vec<(T, T)>>
where
    T: Value + num_traits::Float + SampleUniform,
    StandardNormal: Distribution<T>,
{
    let data = sine(n);
    log::debug!("Generated {n} sine samples with noise level {sigma:?}, seed {seed}");
    data.apply_normal_noise(sigma, Some(seed))
}
