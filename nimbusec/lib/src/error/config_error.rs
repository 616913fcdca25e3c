//! Endpoint and client configuration errors.

use thiserror::Error;

/// Errors in client or endpoint configuration.
///
/// These errors occur during client setup or request construction and
/// usually indicate a programmer or deployment error rather than a
/// problem with the remote service.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing or resolution failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required field is missing on a record.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A required environment variable is not set.
    #[error("Missing environment variable: {var}")]
    MissingEnv {
        /// The environment variable that was checked.
        var: &'static str,
    },

    /// A default header name or value is not valid HTTP.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header problem.
        message: String,
    },
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }
}
