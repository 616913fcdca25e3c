//! Request execution with tracing instrumentation.
//!
//! This module provides the [`NimbusecClient`] struct for executing signed
//! HTTP requests against the nimbusec API.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{Span, debug, instrument, warn};
use url::Url;

use super::interpret::interpret;
use crate::auth::Credentials;
use crate::endpoint::Endpoint;
use crate::error::{ApiError, ClientError, ConfigError, ValidationError};
use crate::method::RestMethod;
use crate::response::{BinaryFormat, JsonFormat, PlainTextFormat, ResponseFormat};

/// Query parameters appended to a request URL.
///
/// Query parameters take part in the request signature.
pub type Query<'a> = [(&'a str, &'a str)];

/// User agent sent with every request.
const USER_AGENT: &str = concat!("nimbusec-rust/", env!("CARGO_PKG_VERSION"));

/// Request body variants the API accepts.
#[derive(Debug)]
enum RequestBody {
    Json(Vec<u8>),
    Text(String),
}

impl RequestBody {
    fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, ApiError> {
        let encoded = serde_json::to_vec(body).map_err(ValidationError::JsonEncode)?;
        Ok(Self::Json(encoded))
    }

    fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => "application/json",
            Self::Text(_) => "text/plain",
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Json(bytes) => bytes,
            Self::Text(text) => text.into_bytes(),
        }
    }
}

/// Builder for configuring a [`NimbusecClient`].
#[derive(Debug)]
pub struct NimbusecClientBuilder {
    base_url: Result<Url, ConfigError>,
    credentials: Credentials,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
}

impl NimbusecClientBuilder {
    fn new(base_url: Result<Url, ConfigError>, credentials: Credentials) -> Self {
        Self {
            base_url,
            credentials,
            timeout: None,
            default_headers: HeaderMap::new(),
        }
    }

    /// Sets the request timeout.
    ///
    /// Without a timeout a hung request waits until the connection drops.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let client = NimbusecClient::builder(url, key, secret)?
    ///     .timeout(Duration::from_secs(60))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a default header to all requests.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Builds the [`NimbusecClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be constructed.
    pub fn build(self) -> Result<NimbusecClient, ApiError> {
        let base_url = self.base_url?;

        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(self.default_headers)
            .pool_max_idle_per_host(10);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Request)?;

        Ok(NimbusecClient {
            client,
            base_url,
            credentials: self.credentials,
        })
    }
}

/// Async client for the nimbusec API.
///
/// The client is an immutable value: it holds the base URL, the signing
/// credentials and a pooled `reqwest::Client`. Cloning is cheap and clones
/// share the connection pool.
///
/// ## Examples
///
/// ```rust,ignore
/// use nimbusec::{Filter, NimbusecClient};
///
/// let client = NimbusecClient::new("https://api.nimbusec.com/", "key", "secret")?;
///
/// for domain in client.domains().find(Filter::empty()).await? {
///     println!("{}", domain.name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct NimbusecClient {
    client: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl NimbusecClient {
    /// Creates a new builder for configuring a client.
    ///
    /// An unparsable `base_url` is reported by [`NimbusecClientBuilder::build`].
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingCredential`](crate::error::AuthError::MissingCredential)
    /// if the key or secret is empty.
    pub fn builder(
        base_url: impl AsRef<str>,
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<NimbusecClientBuilder, ApiError> {
        let credentials = Credentials::new(key, secret)?;
        let base_url = Url::parse(base_url.as_ref()).map_err(ConfigError::from);
        Ok(NimbusecClientBuilder::new(base_url, credentials))
    }

    /// Creates a client with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the URL cannot be parsed, a credential is empty, or
    /// the HTTP client cannot be constructed.
    pub fn new(
        base_url: impl AsRef<str>,
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, ApiError> {
        Self::builder(base_url, key, secret)?.build()
    }

    /// Returns the base URL for this client.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the public API key this client signs with.
    pub fn key(&self) -> &str {
        self.credentials.key()
    }

    /// Fetches `endpoint` and decodes the JSON response.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request fails, the service rejects it, or the
    /// body is not valid JSON for `T`.
    pub async fn get<T>(&self, endpoint: &Endpoint, query: &Query<'_>) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + Sync,
    {
        self.execute::<JsonFormat<T>>(RestMethod::Get, endpoint, query, None)
            .await
    }

    /// Fetches `endpoint` for its side effect, discarding the response body.
    pub async fn get_discarding(&self, endpoint: &Endpoint, query: &Query<'_>) -> Result<(), ApiError> {
        self.execute_discarding(RestMethod::Get, endpoint, query, None)
            .await
    }

    /// Posts a JSON body and decodes the JSON response.
    pub async fn post<B, T>(
        &self,
        endpoint: &Endpoint,
        query: &Query<'_>,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Send + Sync,
    {
        let body = RequestBody::json(body)?;
        self.execute::<JsonFormat<T>>(RestMethod::Post, endpoint, query, Some(body))
            .await
    }

    /// Posts a JSON body, discarding whatever the service returns.
    pub async fn post_discarding<B>(
        &self,
        endpoint: &Endpoint,
        query: &Query<'_>,
        body: &B,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = RequestBody::json(body)?;
        self.execute_discarding(RestMethod::Post, endpoint, query, Some(body))
            .await
    }

    /// Replaces a record with a JSON body and decodes the JSON response.
    pub async fn put<B, T>(
        &self,
        endpoint: &Endpoint,
        query: &Query<'_>,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Send + Sync,
    {
        let body = RequestBody::json(body)?;
        self.execute::<JsonFormat<T>>(RestMethod::Put, endpoint, query, Some(body))
            .await
    }

    /// Replaces a record with a JSON body, discarding the response.
    pub async fn put_discarding<B>(
        &self,
        endpoint: &Endpoint,
        query: &Query<'_>,
        body: &B,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = RequestBody::json(body)?;
        self.execute_discarding(RestMethod::Put, endpoint, query, Some(body))
            .await
    }

    /// Deletes `endpoint`. The response body is drained and discarded.
    ///
    /// ## Errors
    ///
    /// A rejected delete is reported like any other rejected request.
    pub async fn delete(&self, endpoint: &Endpoint, query: &Query<'_>) -> Result<(), ApiError> {
        self.execute_discarding(RestMethod::Delete, endpoint, query, None)
            .await
    }

    /// Fetches a `text/plain` value.
    pub async fn get_text(&self, endpoint: &Endpoint, query: &Query<'_>) -> Result<String, ApiError> {
        self.execute::<PlainTextFormat>(RestMethod::Get, endpoint, query, None)
            .await
    }

    /// Stores a `text/plain` value and returns the service's echo of it.
    pub async fn put_text(
        &self,
        endpoint: &Endpoint,
        query: &Query<'_>,
        text: impl Into<String>,
    ) -> Result<String, ApiError> {
        let body = RequestBody::Text(text.into());
        self.execute::<PlainTextFormat>(RestMethod::Put, endpoint, query, Some(body))
            .await
    }

    /// Fetches raw bytes, e.g. an agent binary.
    pub async fn get_bytes(
        &self,
        endpoint: &Endpoint,
        query: &Query<'_>,
    ) -> Result<Vec<u8>, ApiError> {
        self.execute::<BinaryFormat>(RestMethod::Get, endpoint, query, None)
            .await
    }

    /// Sends a request and decodes an accepted response with `F`.
    async fn execute<F>(
        &self,
        method: RestMethod,
        endpoint: &Endpoint,
        query: &Query<'_>,
        body: Option<RequestBody>,
    ) -> Result<F::Output, ApiError>
    where
        F: ResponseFormat,
    {
        let response = self
            .send(method, endpoint, query, body, F::content_type())
            .await?;

        let body = response.bytes().await.map_err(ClientError::Request)?;
        let parsed = F::parse(body).await.map_err(ApiError::Validation)?;

        Ok(parsed)
    }

    /// Sends a request and drains an accepted response without decoding it.
    async fn execute_discarding(
        &self,
        method: RestMethod,
        endpoint: &Endpoint,
        query: &Query<'_>,
        body: Option<RequestBody>,
    ) -> Result<(), ApiError> {
        let response = self.send(method, endpoint, query, body, "*/*").await?;

        let drained = response.bytes().await.map_err(ClientError::Request)?;
        debug!(bytes = drained.len(), "discarded response body");

        Ok(())
    }

    /// Signs and sends one request, then runs the response interpreter.
    ///
    /// Rejected responses are drained before the error is returned, so an
    /// error never leaves an unread body on the connection.
    #[instrument(
        name = "nimbusec_request",
        skip(self, endpoint, query, body, accept),
        fields(
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    async fn send(
        &self,
        method: RestMethod,
        endpoint: &Endpoint,
        query: &Query<'_>,
        body: Option<RequestBody>,
        accept: &'static str,
    ) -> Result<reqwest::Response, ApiError> {
        debug_assert!(body.is_none() || method.has_body());
        Span::current().record("http.method", method.to_string().as_str());

        let mut url = endpoint.full_url(&self.base_url)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().copied());
        }
        Span::current().record("http.url", url.as_str());

        let authorization = self.credentials.authorize(method, &url)?;

        let mut request = self
            .client
            .request(method.to_reqwest(), url)
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, accept);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, body.content_type())
                .body(body.into_bytes());
        }

        let response = request.send().await.map_err(ClientError::Request)?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        if let Err(err) = interpret(status, response.headers()) {
            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);

            // Best effort: the error is what matters, not the drain outcome.
            let _ = response.bytes().await;
            warn!(status = status.as_u16(), error = %err, "request rejected");

            return Err(err);
        }

        Span::current().record("otel.status_code", "OK");

        Ok(response)
    }
}
