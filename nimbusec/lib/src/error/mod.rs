//! Layered error types for the nimbusec client.
//!
//! The error hierarchy keeps every failure mode distinguishable:
//! - [`ApiError`] - Top-level error type returned by every operation
//! - [`ClientError`] - Transport failures and unexplained HTTP statuses
//! - [`ValidationError`] - Request encoding and response decoding errors
//! - [`LookupError`] - Exactly-one lookups that matched zero or several records
//! - [`AuthError`] - Credential and request signing errors
//! - [`ConfigError`] - Endpoint, URL and environment configuration errors
//!
//! Service-reported failures (a non-success status carrying the
//! `x-nimbusec-error` header) are represented directly by
//! [`ApiError::Service`] so that the service's own text is the error message.

mod api_error;
mod auth_error;
mod client_error;
mod config_error;
mod lookup_error;
mod validation_error;

pub use api_error::ApiError;
pub use auth_error::AuthError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use lookup_error::LookupError;
pub use validation_error::ValidationError;
