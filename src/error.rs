//! Errors returned by simplification and view construction.
use crate::Precision;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Tolerance was negative or NaN.
    #[error("tolerance must be a non-negative number, got {0}")]
    InvalidTolerance(Precision),

    /// A coordinate was NaN or infinite.
    #[error("point {index} has a non-finite coordinate")]
    MalformedPoint { index: usize },

    /// Douglas-Peucker ran out of chord evaluations.
    #[error("simplification exceeded its budget of {budget} chord evaluations")]
    BudgetExceeded { budget: usize },

    #[error("viewport must have finite, positive dimensions, got {width}x{height}")]
    InvalidViewport { width: Precision, height: Precision },

    #[error("start scale must be finite and positive, got {0}")]
    InvalidStartScale(Precision),

    #[error("zoom scale factor must be finite and greater than 1, got {0}")]
    InvalidScaleFactor(Precision),
}
