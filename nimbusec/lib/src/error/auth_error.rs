//! Credential and request signing errors.

use thiserror::Error;

/// Errors related to the OAuth credentials used to sign requests.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A credential component is empty.
    #[error("Missing API {component}")]
    MissingCredential {
        /// Which part of the key pair is missing (`key` or `secret`).
        component: &'static str,
    },

    /// The key or secret cannot be used to build a signed request.
    #[error("Invalid API key format")]
    InvalidKeyFormat,
}
