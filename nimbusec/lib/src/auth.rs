//! Request signing.
//!
//! The nimbusec API authenticates every request with two-legged OAuth 1.0a:
//! the API key and secret act as consumer credentials, there is no access
//! token, and the signature method is HMAC-SHA1. Query parameters take part
//! in the signature; JSON and text bodies do not.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use rand::Rng;
use rand::distributions::Alphanumeric;
use sha1::Sha1;
use url::Url;

use crate::error::AuthError;
use crate::method::RestMethod;

/// OAuth signature method announced in every request.
const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// OAuth protocol version announced in every request.
const OAUTH_VERSION: &str = "1.0";

/// Length of the random nonce.
const NONCE_LEN: usize = 32;

/// The API key and secret used to sign requests.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    /// Creates a key/secret pair.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingCredential`] if either part is empty.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self, AuthError> {
        let key = key.into();
        let secret = secret.into();

        if key.is_empty() {
            return Err(AuthError::MissingCredential { component: "key" });
        }
        if secret.is_empty() {
            return Err(AuthError::MissingCredential {
                component: "secret",
            });
        }

        Ok(Self { key, secret })
    }

    /// Returns the public API key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Builds the `Authorization` header value for a request.
    ///
    /// `url` must already carry the final query string.
    pub(crate) fn authorize(&self, method: RestMethod, url: &Url) -> Result<String, AuthError> {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();
        let timestamp = chrono::Utc::now().timestamp().to_string();

        self.authorize_with(method, url, &nonce, &timestamp)
    }

    fn authorize_with(
        &self,
        method: RestMethod,
        url: &Url,
        nonce: &str,
        timestamp: &str,
    ) -> Result<String, AuthError> {
        let oauth_params = [
            ("oauth_consumer_key", self.key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp),
            ("oauth_version", OAUTH_VERSION),
        ];

        let base = signature_base(method, url, &oauth_params);
        let signature = self.sign(&base)?;

        let mut header = String::from("OAuth ");
        let fields = oauth_params
            .iter()
            .copied()
            .chain(std::iter::once(("oauth_signature", signature.as_str())))
            .map(|(k, v)| format!("{k}=\"{}\"", encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        header.push_str(&fields);

        Ok(header)
    }

    /// HMAC-SHA1 over the base string, keyed with `secret&` (empty token secret).
    fn sign(&self, base: &str) -> Result<String, AuthError> {
        let signing_key = format!("{}&", encode(&self.secret));
        let mut mac = Hmac::<Sha1>::new_from_slice(signing_key.as_bytes())
            .map_err(|_| AuthError::InvalidKeyFormat)?;
        mac.update(base.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// RFC 3986 percent-encoding as required by OAuth 1.0a.
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Builds the OAuth signature base string:
/// `METHOD&encoded(base-url)&encoded(sorted-params)`.
fn signature_base(method: RestMethod, url: &Url, oauth_params: &[(&str, &str)]) -> String {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .chain(oauth_params.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    params.sort();

    let normalized = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let base_url = format!("{}{}", url.origin().ascii_serialization(), url.path());

    format!("{method}&{}&{}", encode(&base_url), encode(&normalized))
}
