//! Error types for the epi-forecast library.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for preparation, fitting and forecasting operations.
pub type Result<T> = std::result::Result<T, EpiError>;

/// Errors that can occur while preparing series or fitting models.
///
/// Descriptive statistics never produce these; undefined statistics are
/// reported as `Option::None` or an absent (NaN) value instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EpiError {
    /// A raw row's date string could not be parsed. Fatal for the whole
    /// preparation step.
    #[error("unparsable date '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Two input rows share the same calendar date.
    #[error("duplicate date {0} in input rows")]
    DuplicateDate(NaiveDate),

    /// Series dates must be strictly increasing.
    #[error("out-of-order date {next} after {prev}")]
    UnorderedDates { prev: NaiveDate, next: NaiveDate },

    /// No eligible points remain for training-window extraction.
    #[error("no eligible points in series '{0}'")]
    EmptySeries(String),

    /// Too few points in the training window for the requested orders.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The training window has zero variance; no model is returned.
    #[error("degenerate training window: constant values")]
    DegenerateSeries,

    /// Parameter estimation exhausted its iteration budget.
    #[error("optimizer failed to converge after {iterations} iterations")]
    Convergence { iterations: usize },

    /// Invalid argument value (non-positive horizon, zero window size, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Mismatched lengths between paired inputs.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}
