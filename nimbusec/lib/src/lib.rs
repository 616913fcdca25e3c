//! Client library for the nimbusec security-monitoring API.
//!
//! The crate exposes typed create / read / update / delete / search
//! operations over the service's resources: domains, users, scan results,
//! bundles, agent tokens and agent binaries. All state lives on the server;
//! the client only holds the endpoint and the key/secret pair.
//!
//! ## Features
//!
//! - **Signed requests**: two-legged OAuth 1.0a (HMAC-SHA1) on every call
//! - **Uniform vocabulary**: one generic [`Collection`] implements create,
//!   upsert, get, find, update and delete for every resource
//! - **Classified errors**: the service's `x-nimbusec-error` header becomes
//!   [`ApiError::Service`]; transport, decode and lookup failures have their
//!   own variants
//! - **Tracing**: every request runs in a `nimbusec_request` span
//!
//! ## Example
//!
//! ```rust,ignore
//! use nimbusec::{Config, Domain, Filter};
//!
//! let client = Config::from_env()?.client()?;
//!
//! let created = client
//!     .domains()
//!     .create(&Domain {
//!         name: "example.com".into(),
//!         scheme: "https".into(),
//!         bundle: "b-basic".into(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let critical = client
//!     .results(created.id.unwrap_or_default())
//!     .find(Filter::new("severity ge 3"))
//!     .await?;
//! ```

pub mod agent;
pub mod auth;
pub mod bundle;
pub mod client;
pub mod config;
pub mod domain;
pub mod endpoint;
pub mod error;
pub mod filter;
pub mod method;
pub mod resource;
pub mod response;
pub mod result;
pub mod timestamp;
pub mod token;
pub mod user;

// Re-exports for convenience
pub use agent::{Agent, Agents};
pub use auth::Credentials;
pub use bundle::{Bundle, BundleId, Bundles};
pub use client::{NimbusecClient, NimbusecClientBuilder};
pub use config::{Config, DEFAULT_API};
pub use domain::{BillingChange, Domain, DomainConfig, DomainEvent, Domains};
pub use endpoint::Endpoint;
pub use error::{ApiError, AuthError, ClientError, ConfigError, LookupError, ValidationError};
pub use filter::{EMPTY_FILTER, Filter};
pub use method::RestMethod;
pub use resource::{Collection, Resource, Writable};
pub use response::ResponseFormat;
pub use result::ScanResult;
pub use timestamp::Timestamp;
pub use token::{Token, Tokens};
pub use user::{Role, User, Users};
