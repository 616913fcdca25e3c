//! Response format trait and implementations.
//!
//! The [`ResponseFormat`] trait defines how to decode an HTTP response body
//! into a typed value. The body is only handed to a format after the
//! response interpreter accepted the status.

use std::future::Future;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::ValidationError;

/// Trait for response decoding strategies.
///
/// ## Examples
///
/// ```rust,ignore
/// use nimbusec::response::{JsonFormat, ResponseFormat};
///
/// // The format type encodes both the decoding strategy and output type
/// type DomainList = JsonFormat<Vec<nimbusec::Domain>>;
/// ```
pub trait ResponseFormat: Send + Sync {
    /// The output type after decoding.
    type Output: Send + Sync;

    /// Decode a response body into the output type.
    fn parse(
        body: bytes::Bytes,
    ) -> impl Future<Output = Result<Self::Output, ValidationError>> + Send;

    /// Returns the Content-Type this format accepts.
    fn content_type() -> &'static str;
}

/// JSON response format with typed deserialization.
///
/// ## Type Parameters
///
/// - `T`: The type to deserialize the JSON into. Must implement [`DeserializeOwned`].
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<T>);

impl<T: DeserializeOwned + Send + Sync> ResponseFormat for JsonFormat<T> {
    type Output = T;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        serde_json::from_slice(&body).map_err(ValidationError::JsonParse)
    }

    fn content_type() -> &'static str {
        "application/json"
    }
}

/// Plain text response format.
///
/// Returns the response body as a UTF-8 string.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormat;

impl ResponseFormat for PlainTextFormat {
    type Output = String;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        String::from_utf8(body.to_vec()).map_err(|e| ValidationError::InvalidText {
            reason: e.to_string(),
        })
    }

    fn content_type() -> &'static str {
        "text/plain"
    }
}

/// Binary response format.
///
/// Returns the raw response bytes without interpretation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryFormat;

impl ResponseFormat for BinaryFormat {
    type Output = Vec<u8>;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        Ok(body.to_vec())
    }

    fn content_type() -> &'static str {
        "application/octet-stream"
    }
}
