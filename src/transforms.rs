//! Utilities for perturbing datasets
//!
//! Data can be transformed by anything implementing the [`Transform`] trait, which applies the transformation over a set of values.
//!
//! The [`Transformable`] trait is a convenient wrapper that allows you to apply transformations to your data more easily.
//!
//! # Noise: [`NoiseTransform`] / [`ApplyNoise`]
//! - Gaussian noise: [`NoiseTransform::Gaussian`]
//!   - Adds independent `N(0, σ²)` samples to each value.
//!   - [`ApplyNoise::apply_normal_noise`] allows you to apply it to the Y channel of an (X, Y) dataset
//! - Uniform noise: [`NoiseTransform::Uniform`]
//!   - Adds samples drawn uniformly from `[-strength, strength)`.
//!   - [`ApplyNoise::apply_uniform_noise`] allows you to apply it to the Y channel of an (X, Y) dataset
//!
//! Every transform takes an optional seed. With a seed the output is reproducible across runs,
//! which is what the synthetic datasets in [`crate::synthetic`] rely on.
use crate::{error::Result, value::Value};

mod noise;
pub use noise::{ApplyNoise, NoiseTransform};

pub use rand;
pub use rand_distr;

/// Trait for applying transformations to data.
pub trait Transform<T: Value> {
    /// Applies the transformation to the given data.
    ///
    /// # Errors
    /// Returns an error if the transform's parameters are invalid.
    fn apply<'a>(&self, data: impl Iterator<Item = &'a mut T>) -> Result<()>;
}

/// Trait for transforming data.
pub trait Transformable<T: Value> {
    /// Transforms the Y channel of the data in place.
    ///
    /// # Errors
    /// Returns an error if the transform's parameters are invalid.
    fn transform<R: Transform<T>>(&mut self, transform: &R) -> Result<()>;
}
impl<T: Value> Transformable<T> for Vec<(T, T)> {
    fn transform<R: Transform<T>>(&mut self, transform: &R) -> Result<()> {
        transform.apply(self.iter_mut().map(|(_, y)| y))
    }
}
