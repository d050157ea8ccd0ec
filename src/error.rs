//! Error types for the nowcast-backtest library.

use thiserror::Error;

/// Result type alias for backtest operations.
pub type Result<T> = std::result::Result<T, BacktestError>;

/// Errors that can occur while building features, evaluating or summarizing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BacktestError {
    /// Malformed input panel: missing columns, unparsable values,
    /// duplicate dates or a non-positive regressor where a log is taken.
    #[error("data error: {0}")]
    DataError(String),

    /// Aggregation was asked to summarize zero errors.
    #[error("cannot summarize an empty error sequence")]
    EmptyInput,

    /// Least-squares solve failed on a degenerate or underdetermined design.
    #[error("numerical error: {0}")]
    Numerical(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Filesystem failure while reading the panel or writing results.
    #[error("io error: {0}")]
    Io(String),

    /// Delimited-table encoding or decoding failure.
    #[error("csv error: {0}")]
    Csv(String),

    /// Configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl From<std::io::Error> for BacktestError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for BacktestError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<toml::de::Error> for BacktestError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
