//! HTTP transport errors.

use thiserror::Error;

/// Errors from the HTTP transport layer.
///
/// `Request` wraps network and protocol failures unchanged. A non-success
/// status that arrives without a service error message is reported as
/// `UnexpectedStatus`; no message is made up for it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success status without an error header.
    #[error("Unexpected HTTP status {status}")]
    UnexpectedStatus {
        /// The HTTP status code returned.
        status: u16,
    },
}

impl ClientError {
    /// Returns the HTTP status code if one is known.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}
