//! HTTP client module.
//!
//! This module provides the async [`NimbusecClient`], its builder, and the
//! response interpreter that turns the service's out-of-band error header
//! into a typed error.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use nimbusec::{Endpoint, NimbusecClient};
//!
//! let client = NimbusecClient::new("https://api.nimbusec.com/", "key", "secret")?;
//!
//! // Typed helpers work on any endpoint
//! let domain: nimbusec::Domain = client
//!     .get(&Endpoint::new("/v2/domain").join(42), &[])
//!     .await?;
//!
//! // Resource handles wrap the helpers for each record type
//! let same = client.domains().get(42).await?;
//! ```

mod executor;
mod interpret;

pub use executor::{NimbusecClient, NimbusecClientBuilder, Query};
pub use interpret::{ERROR_HEADER, interpret};
