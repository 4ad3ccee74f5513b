//! Error types for the arima-forecast library.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur during fitting or forecasting.
///
/// Every error is terminal for the invocation that produced it: nothing is
/// retried internally and no partial result is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Malformed input: bad series shape, degenerate model order, or an
    /// out-of-range confidence level.
    #[error("validation error: {0}")]
    Validation(String),

    /// The series is too short for the requested operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The estimation problem is numerically degenerate, e.g. a constant
    /// working series makes the normal equations singular.
    #[error("singular model: {0}")]
    SingularModel(String),

    /// The iterative estimator hit its iteration cap before the residual
    /// sum of squares stabilized.
    #[error("estimation did not converge within {max_iter} iterations")]
    NonConvergence { max_iter: usize },

    /// The requested forecast horizon is not a positive number of steps.
    #[error("invalid horizon: {0} (must be at least 1)")]
    InvalidHorizon(usize),
}
