//! Response interpretation.
//!
//! The service reports rejections in two places: the HTTP status and a
//! dedicated `x-nimbusec-error` header carrying a human-readable message.
//! [`interpret`] folds both into one decision so that no call site sniffs
//! headers on its own and a rejected response never reaches body decoding.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

use crate::error::{ApiError, ClientError};

/// Response header carrying the service's error message.
pub const ERROR_HEADER: &str = "x-nimbusec-error";

/// Decides whether a completed HTTP exchange succeeded.
///
/// - status below 300: success, whatever the body holds
/// - error header present: [`ApiError::Service`] with the header text as message
/// - otherwise: [`ClientError::UnexpectedStatus`]
///
/// Transport failures never get here; they are propagated as
/// [`ClientError::Request`] by the caller.
///
/// ## Examples
///
/// ```rust
/// use nimbusec::client::{interpret, ERROR_HEADER};
/// use reqwest::StatusCode;
/// use reqwest::header::{HeaderMap, HeaderValue};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(ERROR_HEADER, HeaderValue::from_static("domain not found"));
///
/// let err = interpret(StatusCode::NOT_FOUND, &headers).unwrap_err();
/// assert_eq!(err.to_string(), "domain not found");
/// ```
pub fn interpret(status: StatusCode, headers: &HeaderMap) -> Result<(), ApiError> {
    if status.as_u16() < 300 {
        return Ok(());
    }

    let message = headers
        .get(ERROR_HEADER)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .filter(|message| !message.is_empty());

    match message {
        Some(message) => Err(ApiError::service(status.as_u16(), message)),
        None => Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn with_error(message: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ERROR_HEADER, HeaderValue::from_static(message));
        headers
    }

    #[test]
    fn success_ignores_error_header() {
        assert!(interpret(StatusCode::OK, &with_error("ignored")).is_ok());
        assert!(interpret(StatusCode::NO_CONTENT, &HeaderMap::new()).is_ok());
    }

    #[test]
    fn redirect_range_below_300_is_success() {
        assert!(interpret(StatusCode::from_u16(299).unwrap(), &HeaderMap::new()).is_ok());
    }

    #[test]
    fn error_header_becomes_service_error() {
        let err = interpret(StatusCode::NOT_FOUND, &with_error("domain not found")).unwrap_err();

        assert_eq!(err.to_string(), "domain not found");
        assert!(matches!(
            err,
            ApiError::Service { status: 404, ref message } if message == "domain not found"
        ));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Nimbusec-Error", HeaderValue::from_static("quota exceeded"));

        let err = interpret(StatusCode::FORBIDDEN, &headers).unwrap_err();
        assert_eq!(err.service_message(), Some("quota exceeded"));
    }

    #[test]
    fn missing_header_is_unexpected_status() {
        let err = interpret(StatusCode::INTERNAL_SERVER_ERROR, &HeaderMap::new()).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Client(ClientError::UnexpectedStatus { status: 500 })
        ));
    }

    #[test]
    fn redirect_without_header_is_unexpected_status() {
        let err = interpret(StatusCode::MOVED_PERMANENTLY, &HeaderMap::new()).unwrap_err();
        assert_eq!(err.status_code(), Some(301));
        assert_eq!(err.service_message(), None);
    }
}
