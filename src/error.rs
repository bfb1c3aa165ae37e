//! Error types for the bloomsense library.

use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur during time series analysis.
///
/// Public entry points collapse these into empty results (callers of this
/// engine must never see an analysis failure), but the internal `try_*`
/// functions keep invalid input distinguishable from "valid input, nothing
/// found".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Input series is empty.
    #[error("empty input series")]
    EmptyInput,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Parallel columns of a series have different lengths.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// Wire record is malformed (missing keys, bad dates, unknown flags).
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
