//! CLI error types.

use cinema_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the booking counter.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading the terminal, writing to it, or opening the log file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The domain rejected an operation the session cannot recover from.
    #[error("booking error: {0}")]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts_into_app_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.to_string(), "i/o error: closed");
    }

    #[test]
    fn test_domain_error_keeps_message() {
        let err: AppError = DomainError::CorruptedState("bad id".into()).into();
        assert_eq!(err.to_string(), "booking error: corrupted state: bad id");
    }
}
