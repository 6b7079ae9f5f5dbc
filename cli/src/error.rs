#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use apiref_core::AppError;
use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Engine failure.
    #[display("{}", _0)]
    App(AppError),

    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// A batch task panicked or was cancelled.
    #[display("Task failed: {}", _0)]
    Join(tokio::task::JoinError),

    /// The concurrency limiter was closed.
    #[display("Concurrency limiter closed: {}", _0)]
    Acquire(tokio::sync::AcquireError),

    /// The tracing subscriber could not be installed.
    #[from(ignore)]
    #[display("Failed to initialise logging: {}", _0)]
    Logging(String),
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::App(AppError::Json(e))
    }
}

impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_passes_through() {
        let err: CliError = AppError::PathNotFound("/x".into()).into();
        assert_eq!(err.to_string(), AppError::PathNotFound("/x".into()).to_string());
    }

    #[test]
    fn test_io_error_display() {
        let err: CliError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.to_string(), "IO Error: gone");
    }
}
