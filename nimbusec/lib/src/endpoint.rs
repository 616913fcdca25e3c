//! Relative endpoint paths and their resolution against the API base URL.
//!
//! An [`Endpoint`] is a path template such as `/v2/domain/{id}/config/{key}`
//! plus the values for its placeholders. Values are percent-encoded as path
//! segments, so a configuration key or login can never escape its segment.

use std::fmt::Display;

use url::Url;

use crate::error::ConfigError;

/// A relative API path with substituted parameters.
///
/// ## Examples
///
/// ```rust
/// use nimbusec::Endpoint;
///
/// let endpoint = Endpoint::new("/v2/domain/{id}/config/{key}")
///     .param("id", 42)
///     .param("key", "scan window");
///
/// assert_eq!(endpoint.path(), "/v2/domain/42/config/scan%20window");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// URL path template (may contain `{param}` placeholders).
    template: String,
    /// Encoded placeholder values, in insertion order.
    params: Vec<(String, String)>,
}

impl Endpoint {
    /// Creates an endpoint from a path template.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            params: Vec::new(),
        }
    }

    /// Sets the value of a `{name}` placeholder.
    ///
    /// The value is formatted with [`Display`] and percent-encoded, so
    /// formatting never fails.
    pub fn param(mut self, name: impl Into<String>, value: impl Display) -> Self {
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        self.params.push((name.into(), encoded));
        self
    }

    /// Appends one path segment, e.g. a record id to a collection path.
    pub fn join(mut self, segment: impl Display) -> Self {
        let encoded = urlencoding::encode(&segment.to_string()).into_owned();
        self.template.push('/');
        self.template.push_str(&encoded);
        self
    }

    /// Returns the raw path template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the path with all known placeholders substituted.
    pub fn path(&self) -> String {
        let mut path = self.template.clone();
        for (key, value) in &self.params {
            path = path.replace(&format!("{{{key}}}"), value);
        }
        path
    }

    /// Extracts placeholder names from the template, in order of appearance.
    pub fn path_params(&self) -> Vec<&str> {
        let mut params = Vec::new();
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                break;
            };
            if end > 0 {
                params.push(&after[..end]);
            }
            rest = &after[end + 1..];
        }

        params
    }

    /// Resolves this endpoint against the API base URL.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the path cannot be resolved.
    pub fn full_url(&self, base_url: &Url) -> Result<Url, ConfigError> {
        Ok(base_url.join(&self.path())?)
    }
}

impl From<&str> for Endpoint {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}
