//! Error types for table loading.

use thiserror::Error;

/// Main error type for loader operations.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Configuration error (unknown option keys, empty column set, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A row's value count does not match the resolved column count.
    ///
    /// Recoverable: the row pipeline routes this through the configured
    /// invalid-row policy before it can surface to the caller.
    #[error("Row validation failed: expected {expected} values, got {actual}")]
    RowValidation { expected: usize, actual: usize },

    /// Failure reported by the database handle.
    #[error("Execution error while {context}: {message}")]
    Execution { context: String, message: String },
}

impl LoaderError {
    /// Create a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        LoaderError::Config(message.into())
    }

    /// Create an Execution error with context about where it occurred.
    pub fn execution(context: impl Into<String>, message: impl Into<String>) -> Self {
        LoaderError::Execution {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Whether this is a row validation error.
    pub fn is_row_validation(&self) -> bool {
        matches!(self, LoaderError::RowValidation { .. })
    }
}

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;
