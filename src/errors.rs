//! Centralized error handling for parstats
//!
//! Statistics that are undefined for the given data (the mean of nothing, the
//! variance of nothing) are reported as `None` by the statistic itself. The
//! types here cover everything else: parameters rejected at the call
//! boundary, values that cannot be ordered, thread pool setup and the I/O
//! done by the command-line tool.

use std::fmt;

/// Main error type for parstats operations
#[derive(Debug)]
pub enum StatsError {
    /// A parameter was rejected before any work was dispatched
    InvalidParameter { name: &'static str, message: String },

    /// A value that cannot be ordered (NaN) was given to a sort-based statistic
    UnorderedValue { index: usize },

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Input text that is not a number
    ParseError { line: usize, token: String },

    /// I/O operation errors
    IoError(std::io::Error),

    /// Generic error for anything else
    Generic(String),
}

impl StatsError {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::InvalidParameter { name, message } => {
                write!(f, "Invalid parameter '{}': {}", name, message)
            }
            StatsError::UnorderedValue { index } => {
                write!(f, "Value at index {} cannot be ordered (NaN)", index)
            }
            StatsError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            StatsError::ParseError { line, token } => {
                write!(f, "Line {}: '{}' is not a number", line, token)
            }
            StatsError::IoError(e) => write!(f, "I/O error: {}", e),
            StatsError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StatsError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StatsError {
    fn from(error: std::io::Error) -> Self {
        StatsError::IoError(error)
    }
}

impl From<rayon::ThreadPoolBuildError> for StatsError {
    fn from(error: rayon::ThreadPoolBuildError) -> Self {
        StatsError::ThreadPoolError(error.to_string())
    }
}

impl From<String> for StatsError {
    fn from(error: String) -> Self {
        StatsError::Generic(error)
    }
}

impl From<&str> for StatsError {
    fn from(error: &str) -> Self {
        StatsError::Generic(error.to_string())
    }
}

/// Result type alias for parstats operations
pub type Result<T> = std::result::Result<T, StatsError>;
