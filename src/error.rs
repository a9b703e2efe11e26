//! Error types for polynomial regression
//!
//! This module defines the failure modes of fitting, prediction and table
//! I/O, along with a convenient `Result` alias.

/// Errors that can occur during polynomial regression.
///
/// Every failure is raised at the point of violation; nothing in the crate
/// retries or returns partial results.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cannot perform curve fitting because there is no data.
    #[error("No data available for fitting")]
    NoData,

    /// The training inputs and targets have different lengths.
    #[error("Training data mismatch: {x} inputs but {t} targets")]
    LengthMismatch {
        /// Number of training inputs
        x: usize,
        /// Number of training targets
        t: usize,
    },

    /// A hyperparameter is outside its valid domain.
    ///
    /// Precisions (`alpha`, `beta`) must be strictly positive, the ridge strength must be non-negative,
    /// and all of them must be finite.
    #[error("Invalid value for `{name}`: {value}")]
    InvalidHyperparameter {
        /// Name of the offending parameter
        name: &'static str,
        /// The value that was supplied
        value: f64,
    },

    /// A polynomial cannot have the given number of coefficients.
    #[error("A polynomial cannot have exactly {0} coefficients")]
    InvalidNumberOfParameters(usize),

    /// Cannot solve the linear system because its matrix is singular
    ///
    /// Usually, degree is too high for the data and no regularization was applied.
    #[error(
        "System matrix is not invertible; the data may be insufficient or collinear. Consider regularization. [n: {n}, k: {k}]"
    )]
    SingularMatrix {
        /// Number of data points
        n: usize,
        /// Number of basis functions
        k: usize,
    },

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,

    /// Failed to solve the algebraic system.
    ///
    /// Contains a static string describing the solver error.
    #[error("Failed to solve: {0}")]
    Algebra(&'static str),

    /// Reading or writing a data table failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A row of a data table could not be parsed.
    #[error("Line {line}: {message}")]
    Parse {
        /// 1-based line number of the row
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// A JSON dataset could not be parsed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Builds an [`Error::InvalidHyperparameter`], widening the value to `f64` for display.
    pub(crate) fn hyperparameter<T: num_traits::ToPrimitive>(name: &'static str, value: T) -> Self {
        Self::InvalidHyperparameter {
            name,
            value: value.to_f64().unwrap_or(f64::NAN),
        }
    }
}

/// Result type for polynomial regression
pub type Result<T> = std::result::Result<T, Error>;
