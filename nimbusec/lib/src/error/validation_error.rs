//! Request encoding and response decoding errors.

use thiserror::Error;

/// Errors while encoding a request body or decoding a response body.
///
/// These only occur after the service accepted the request, so they are
/// never confused with a service-reported failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Request body could not be encoded as JSON.
    #[error("JSON encode error: {0}")]
    JsonEncode(serde_json::Error),

    /// Plain text response body was not valid UTF-8.
    #[error("Invalid text body: {reason}")]
    InvalidText {
        /// Why the body could not be read as text.
        reason: String,
    },
}

impl ValidationError {
    /// Returns `true` if this is a response decoding error.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::JsonParse(_) | Self::InvalidText { .. })
    }
}
