//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Verification failed (strict mode)
    #[error("Verification failed: {message}")]
    Verification {
        /// Error message
        message: String,
    },

    /// No built-in check with the given name
    #[error("Unknown check: {name}. Run `verificador list` for available checks")]
    UnknownCheck {
        /// Requested check name
        name: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Verificar library error
    #[error("Verificar error: {0}")]
    Verificar(#[from] verificar::VerifyError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a verification error
    #[must_use]
    pub fn verification(message: impl Into<String>) -> Self {
        Self::Verification {
            message: message.into(),
        }
    }

    /// Create an unknown-check error
    #[must_use]
    pub fn unknown_check(name: impl Into<String>) -> Self {
        Self::UnknownCheck { name: name.into() }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("bad config");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad config"));
    }

    #[test]
    fn test_verification_error() {
        let err = CliError::verification("2 check(s) failed");
        assert!(err.to_string().contains("Verification failed"));
    }

    #[test]
    fn test_unknown_check_mentions_list() {
        let err = CliError::unknown_check("homepge");
        assert!(err.to_string().contains("homepge"));
        assert!(err.to_string().contains("verificador list"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }

    #[test]
    fn test_verificar_error_from() {
        let err: CliError = verificar::VerifyError::assertion("missing text").into();
        assert!(err.to_string().contains("Verificar error"));
    }
}
