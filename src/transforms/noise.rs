use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{uniform::SampleUniform, Distribution, Normal, StandardNormal, Uniform};

use crate::{
    error::{Error, Result},
    transforms::{Transform, Transformable},
    value::Value,
};

/// Types of noise based transforms for data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseTransform<T: Value> {
    /// Adds independent Gaussian noise to a signal or dataset.
    ///
    /// This is the observation noise of the curve-fitting model: each target is the
    /// true curve plus a draw from a zero-mean normal distribution.
    ///
    /// <div class="warning">
    ///
    /// **Technical Details**
    ///
    /// ```math
    /// xₙ' = xₙ + εₙ
    /// where
    ///   εₙ ~ N(0, std_dev²)
    /// ```
    /// </div>
    ///
    /// A `std_dev` of zero leaves the data unchanged.
    Gaussian {
        /// Standard deviation (spread) of the Gaussian distribution.
        std_dev: T,

        /// `seed` *(optional)*: Fixes the RNG seed for reproducibility.
        /// If not provided, a system RNG will be used each run.
        seed: Option<u64>,
    },

    /// Adds uniform noise to a signal or dataset.
    ///
    /// <div class="warning">
    ///
    /// **Technical Details**
    ///
    /// ```math
    /// xₙ' = xₙ + uₙ
    /// where
    ///   uₙ ~ U(-strength, strength)
    /// ```
    /// The standard deviation of the added noise is `strength / √3`.
    /// </div>
    Uniform {
        /// Half-width of the uniform interval.
        strength: T,

        /// `seed` *(optional)*: Fixes the RNG seed for reproducibility.
        /// If not provided, a system RNG will be used each run.
        seed: Option<u64>,
    },
}

impl<T: Value> NoiseTransform<T> {
    fn rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    fn check_spread(name: &'static str, value: T) -> Result<()> {
        if !Value::is_real(&value) || value < T::zero() {
            return Err(Error::hyperparameter(name, value));
        }
        Ok(())
    }
}

impl<T: Value> Transform<T> for NoiseTransform<T>
where
    T: num_traits::Float + SampleUniform,
    StandardNormal: Distribution<T>,
{
    fn apply<'a>(&self, data: impl Iterator<Item = &'a mut T>) -> Result<()> {
        match *self {
            NoiseTransform::Gaussian { std_dev, seed } => {
                Self::check_spread("std_dev", std_dev)?;
                let normal = Normal::new(T::zero(), std_dev)
                    .map_err(|_| Error::hyperparameter("std_dev", std_dev))?;

                let mut rng = Self::rng(seed);
                for v in data {
                    *v += normal.sample(&mut rng);
                }
            }

            NoiseTransform::Uniform { strength, seed } => {
                Self::check_spread("strength", strength)?;
                if strength.is_zero() {
                    return Ok(());
                }

                let uniform = Uniform::new(-strength, strength)
                    .map_err(|_| Error::hyperparameter("strength", strength))?;

                let mut rng = Self::rng(seed);
                for v in data {
                    *v += uniform.sample(&mut rng);
                }
            }
        }

        Ok(())
    }
}

/// Trait for applying noise transforms to the Y channel of a dataset.
///
/// # Example
/// ```rust
/// use polyreg::transforms::ApplyNoise;
///
/// let data = vec![(0.0, 1.0), (0.5, 1.0), (1.0, 1.0)];
/// let noisy = data.clone().apply_normal_noise(0.1, Some(42)).unwrap();
///
/// assert_eq!(noisy.len(), data.len());
/// assert!(noisy.iter().zip(&data).all(|(a, b)| a.0 == b.0));
/// ```
pub trait ApplyNoise<T: Value>
where
    Self: Sized,
{
    /// Adds independent `N(0, std_dev²)` noise to each Y value.
    ///
    /// See [`NoiseTransform::Gaussian`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidHyperparameter`] if `std_dev` is negative or not finite.
    fn apply_normal_noise(self, std_dev: T, seed: Option<u64>) -> Result<Self>;

    /// Adds `U(-strength, strength)` noise to each Y value.
    ///
    /// See [`NoiseTransform::Uniform`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidHyperparameter`] if `strength` is negative or not finite.
    fn apply_uniform_noise(self, strength: T, seed: Option<u64>) -> Result<Self>;
}
impl<T: Value> ApplyNoise<T> for Vec<(T, T)>
where
    T: num_traits::Float + SampleUniform,
    StandardNormal: Distribution<T>,
{
    fn apply_normal_noise(mut self, std_dev: T, seed: Option<u64>) -> Result<Self> {
        self.transform(&NoiseTransform::Gaussian { std_dev, seed })?;
        Ok(self)
    }

    fn apply_uniform_noise(mut self, strength: T, seed: Option<u64>) -> Result<Self> {
        self.transform(&NoiseTransform::Uniform { strength, seed })?;
        Ok(self)
    }
}
