//! # Polyreg
//! ## Polynomial curve fitting, from least squares to the Bayesian predictive
//!
//! A small kernel for the classic curve-fitting problem: given noisy samples `(xₙ, tₙ)` of some
//! curve, fit a polynomial `y(x, w) = w₀ + w₁x + … + w_M x^M` and use it to predict new targets.
//!
//! Three pieces make up the kernel:
//! - [`polynomial::horner`] and [`Polynomial`]: evaluation of a coefficient vector by Horner's scheme.
//! - [`LeastSquaresFit`]: the coefficients minimizing the sum-of-squares error, with optional
//!   ridge regularization `λ‖w‖²`.
//! - [`BayesianFit`]: a closed-form Bayesian treatment with prior precision `α` and noise
//!   precision `β`, producing a predictive mean and variance at every query point.
//!
//! ```rust
//! use polyreg::{BayesianFit, LeastSquaresFit};
//!
//! let data: [(f64, f64); 2] = [(0.0, 0.0), (1.0, 1.0)];
//!
//! let fit = LeastSquaresFit::new(&data[..], 1).unwrap();
//! assert!((fit.y(0.5) - 0.5).abs() < 1e-12);
//!
//! let bayes = BayesianFit::new(&data, 1.0, 1.0, 1).unwrap();
//! let p = bayes.predict(0.5);
//! assert!((p.mean - 0.4).abs() < 1e-12);
//! assert!((p.variance - 1.35).abs() < 1e-12);
//! ```
//!
//! # Core Concepts
//! - The **degree** `M` of a polynomial is the highest power of `x`. It has `M + 1` coefficients,
//!   stored in ascending order of power.
//!     - Low degrees underfit; high degrees chase the noise.
//!     - [`fit::rms_sweep`] tabulates training and test error over a range of degrees.
//! - **Regularization** penalizes large coefficients. It tames high-degree fits on small datasets.
//!     - [`fit::coefficient_table`] shows the coefficients shrinking as `λ` grows.
//! - The **Bayesian** fit keeps a full posterior over the coefficients instead of a single best
//!   guess, so every prediction comes with its own uncertainty.
//!     - [`bayes::sequential`] shows that uncertainty shrinking as data arrives.
//!
//! # Data
//! - [`io`] reads and writes the whitespace-delimited tables used for datasets and results.
//! - [`synthetic`] generates the noisy `sin(2πx)` datasets the examples are built on (`transforms` feature).
//!
//! # Testing utilities
//!
//! This crate includes float-tolerant assertion macros and a DSL for writing test polynomials. See [`test`].
//!
//! # Logging
//!
//! Fits report their sizes through the [`log`] facade at `debug` level, and degenerate setups
//! (more coefficients than data points without regularization, a negligible prior) at `warn`.
//! No logger is installed by the library.
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar
#![allow(clippy::many_single_char_names)]
#![cfg_attr(docsrs, feature(doc_cfg))]


#[cfg(feature = "transforms")]
#[cfg_attr(docsrs, doc(cfg(feature = "transforms")))]
pub mod transforms;

#[cfg(feature = "transforms")]
#[cfg_attr(docsrs, doc(cfg(feature = "transforms")))]
pub mod synthetic;

pub mod basis;
pub mod bayes;
pub mod display;
pub mod error;
pub mod fit;
pub mod io;
pub mod polynomial;
pub mod statistics;
pub mod value;

pub use bayes::{BayesianFit, Prediction};
pub use fit::LeastSquaresFit;
pub use polynomial::Polynomial;

pub use nalgebra;
