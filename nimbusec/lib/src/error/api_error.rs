//! Top-level API error type.

use super::{AuthError, ClientError, ConfigError, LookupError, ValidationError};
use thiserror::Error;

/// Top-level error type for all nimbusec operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error kinds when needed.
///
/// ## Examples
///
/// ```rust,ignore
/// use nimbusec::ApiError;
///
/// match client.domains().get(42).await {
///     Ok(domain) => println!("{}", domain.name),
///     Err(ApiError::Service { message, .. }) => eprintln!("rejected: {message}"),
///     Err(ApiError::Validation(e)) => eprintln!("unexpected payload: {e}"),
///     Err(e) => eprintln!("request failed: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failures and non-success statuses without a service message.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The service rejected the request and explained why in the
    /// `x-nimbusec-error` response header.
    ///
    /// The display form is exactly the header text.
    #[error("{message}")]
    Service {
        /// HTTP status code of the rejected response.
        status: u16,
        /// Human-readable message taken verbatim from the error header.
        message: String,
    },

    /// Request encoding or response decoding errors.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Exactly-one lookups that matched nothing or too much.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Credential and signing errors.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Endpoint and environment configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Creates a service-reported error from a status and header message.
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    /// Returns the service's own error message, if the service reported one.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Service { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns the HTTP status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            Self::Client(e) => e.status_code(),
            _ => None,
        }
    }

    /// Returns `true` if the requested record does not exist.
    ///
    /// Covers both named lookups with zero matches and service responses
    /// with status 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Lookup(e) => e.is_not_found(),
            _ => self.status_code() == Some(404),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_displays_header_text_verbatim() {
        let err = ApiError::service(404, "domain not found");
        assert_eq!(err.to_string(), "domain not found");
        assert_eq!(err.service_message(), Some("domain not found"));
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_from_client_error() {
        let client_err = ClientError::UnexpectedStatus { status: 502 };
        let api_err: ApiError = client_err.into();
        assert!(matches!(api_err, ApiError::Client(_)));
        assert_eq!(api_err.status_code(), Some(502));
        assert_eq!(api_err.service_message(), None);
    }

    #[test]
    fn test_from_lookup_error() {
        let lookup = LookupError::NotFound {
            kind: "domain",
            field: "name",
            value: "example.com".to_string(),
        };
        let api_err: ApiError = lookup.into();
        assert!(matches!(api_err, ApiError::Lookup(_)));
        assert!(api_err.is_not_found());
    }

    #[test]
    fn ambiguous_lookup_is_not_not_found() {
        let api_err: ApiError = LookupError::Ambiguous {
            kind: "user",
            field: "login",
            value: "admin".to_string(),
            count: 2,
        }
        .into();
        assert!(!api_err.is_not_found());
    }

    #[test]
    fn service_404_is_not_found() {
        assert!(ApiError::service(404, "gone").is_not_found());
        assert!(!ApiError::service(409, "duplicate").is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Auth(AuthError::InvalidKeyFormat);
        assert!(err.to_string().contains("Invalid API key format"));
    }
}
