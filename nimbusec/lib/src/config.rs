//! Connection configuration.
//!
//! A [`Config`] is the base URL plus the key/secret pair. It can be built
//! directly or read from the environment:
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `NIMBUSEC_URL` | no | `https://api.nimbusec.com/` |
//! | `NIMBUSEC_KEY` | yes | |
//! | `NIMBUSEC_SECRET` | yes | |

use std::env;
use std::fmt;

use crate::client::NimbusecClient;
use crate::error::{ApiError, ConfigError};

/// The public nimbusec API endpoint.
pub const DEFAULT_API: &str = "https://api.nimbusec.com/";

/// Environment variable overriding the API endpoint.
pub const ENV_URL: &str = "NIMBUSEC_URL";

/// Environment variable holding the API key.
pub const ENV_KEY: &str = "NIMBUSEC_KEY";

/// Environment variable holding the API secret.
pub const ENV_SECRET: &str = "NIMBUSEC_SECRET";

/// Connection settings for a [`NimbusecClient`].
///
/// ## Examples
///
/// ```rust,ignore
/// use nimbusec::Config;
///
/// let client = Config::from_env()?.client()?;
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the API.
    pub url: String,
    /// API key.
    pub key: String,
    /// API secret.
    pub secret: String,
}

impl Config {
    /// Creates a configuration for the public API endpoint.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            url: DEFAULT_API.to_string(),
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Replaces the API endpoint.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] if the key or secret is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] if the key or secret is missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &'static str| lookup(var).filter(|value| !value.is_empty());

        let url = read(ENV_URL).unwrap_or_else(|| DEFAULT_API.to_string());
        let key = read(ENV_KEY).ok_or(ConfigError::MissingEnv { var: ENV_KEY })?;
        let secret = read(ENV_SECRET).ok_or(ConfigError::MissingEnv { var: ENV_SECRET })?;

        Ok(Self { url, key, secret })
    }

    /// Builds a client from this configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error if the URL is invalid or a credential is empty.
    pub fn client(&self) -> Result<NimbusecClient, ApiError> {
        NimbusecClient::new(&self.url, self.key.clone(), self.secret.clone())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}
