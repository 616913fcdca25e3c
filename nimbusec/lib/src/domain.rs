//! Domains: the monitored web sites.
//!
//! Besides the uniform vocabulary, a domain carries a set of text
//! configuration values, a billing history and an append-only event log.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::client::NimbusecClient;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::filter::Filter;
use crate::resource::{Collection, Resource, Writable};
use crate::timestamp::Timestamp;

/// Collection path of domains.
const DOMAIN_PATH: &str = "/v2/domain";

/// Path listing domains with open findings.
const INFECTED_PATH: &str = "/v2/infected";

/// Query parameter controlling whether deletion also purges stored data.
const PURGE_PARAM: &str = "pleaseremovealldata";

/// A monitored web site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Domain {
    /// Unique identifier, assigned by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Identifier of the assigned bundle.
    pub bundle: String,
    /// Name of the domain, usually its DNS name.
    pub name: String,
    /// `http` or `https`.
    pub scheme: String,
    /// Starting point for the deep scan.
    pub deep_scan: String,
    /// Landing pages covered by the fast scans.
    pub fast_scans: Vec<String>,
}

impl Resource for Domain {
    const KIND: &'static str = "domain";
    type Id = i64;

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Writable for Domain {}

/// One change of a domain's bundle assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingChange {
    /// When the change took effect.
    pub time: Timestamp,
    /// The bundle assigned from then on.
    pub bundle: String,
    /// Price of the bundle.
    pub amount: i64,
    /// Currency of `amount`.
    pub currency: String,
}

/// An entry in a domain's event log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainEvent {
    /// When the event happened.
    pub time: Timestamp,
    /// Machine-readable event type, e.g. `file-restored`.
    pub event: String,
    /// Human-readable description.
    pub human: String,
    /// Address of the client that reported the event.
    pub remote: String,
    /// Version of the reporting agent or tool.
    pub version: String,
}

/// Handle on the domain collection.
///
/// Dereferences to [`Collection<Domain>`] for the uniform operations.
#[derive(Debug, Clone)]
pub struct Domains<'a> {
    inner: Collection<'a, Domain>,
}

impl<'a> Deref for Domains<'a> {
    type Target = Collection<'a, Domain>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<'a> Domains<'a> {
    pub(crate) fn new(client: &'a NimbusecClient) -> Self {
        Self {
            inner: Collection::new(client, DOMAIN_PATH),
        }
    }

    /// Looks up the domain with exactly this name.
    ///
    /// ## Errors
    ///
    /// Returns a [`LookupError`](crate::error::LookupError) if no domain or
    /// more than one domain has this name.
    pub async fn get_by_name(&self, name: &str) -> Result<Domain, ApiError> {
        self.inner.find_one("name", name).await
    }

    /// Deletes a domain.
    ///
    /// With `purge` set, the service also removes all stored scan data.
    pub async fn delete(&self, id: i64, purge: bool) -> Result<(), ApiError> {
        let purge = if purge { "true" } else { "false" };
        self.inner.remove(&id, &[(PURGE_PARAM, purge)]).await
    }

    /// Lists the domains with open findings that match `filter`.
    pub async fn find_infected(&self, filter: impl Into<Filter>) -> Result<Vec<Domain>, ApiError> {
        let filter = filter.into();
        let query: Vec<(&str, &str)> = filter.query().into_iter().collect();
        self.inner
            .client()
            .get(&Endpoint::new(INFECTED_PATH), &query)
            .await
    }

    /// Returns a handle on the text configuration of domain `id`.
    pub fn configs(&self, id: i64) -> DomainConfig<'a> {
        DomainConfig {
            client: self.inner.client(),
            domain: id,
        }
    }

    /// Lists the billing history of domain `id`, newest first.
    ///
    /// `limit` caps the number of entries; `None` lets the service decide.
    pub async fn billing(&self, id: i64, limit: Option<u32>) -> Result<Vec<BillingChange>, ApiError> {
        let limit = limit.map(|n| n.to_string());
        let query: Vec<(&str, &str)> = limit.as_deref().map(|n| ("limit", n)).into_iter().collect();

        self.inner
            .client()
            .get(&domain_path(id, "billing"), &query)
            .await
    }

    /// Lists events of domain `id` matching `filter`, newest first.
    pub async fn events(
        &self,
        id: i64,
        filter: impl Into<Filter>,
        limit: Option<u32>,
    ) -> Result<Vec<DomainEvent>, ApiError> {
        let filter = filter.into();
        let limit = limit.map(|n| n.to_string());

        let mut query: Vec<(&str, &str)> = filter.query().into_iter().collect();
        if let Some(limit) = limit.as_deref() {
            query.push(("limit", limit));
        }

        self.inner
            .client()
            .get(&domain_path(id, "events"), &query)
            .await
    }

    /// Appends an event to the log of domain `id`.
    pub async fn create_event(&self, id: i64, event: &DomainEvent) -> Result<(), ApiError> {
        self.inner
            .client()
            .post_discarding(&domain_path(id, "events"), &[], event)
            .await
    }
}

impl NimbusecClient {
    /// Returns a handle on the domain collection.
    pub fn domains(&self) -> Domains<'_> {
        Domains::new(self)
    }
}

fn domain_path(id: i64, sub: &str) -> Endpoint {
    Endpoint::new("/v2/domain/{id}/{sub}")
        .param("id", id)
        .param("sub", sub)
}

/// The text key/value configuration of one domain.
#[derive(Debug, Clone)]
pub struct DomainConfig<'a> {
    client: &'a NimbusecClient,
    domain: i64,
}

impl DomainConfig<'_> {
    fn keys(&self) -> Endpoint {
        domain_path(self.domain, "config")
    }

    /// Lists the configured keys.
    pub async fn list(&self) -> Result<Vec<String>, ApiError> {
        self.client.get(&self.keys(), &[]).await
    }

    /// Reads the value of `key`.
    pub async fn get(&self, key: &str) -> Result<String, ApiError> {
        self.client.get_text(&self.keys().join(key), &[]).await
    }

    /// Stores `value` under `key` and returns the stored value.
    pub async fn set(&self, key: &str, value: &str) -> Result<String, ApiError> {
        self.client.put_text(&self.keys().join(key), &[], value).await
    }

    /// Removes `key`.
    pub async fn delete(&self, key: &str) -> Result<(), ApiError> {
        self.client.delete(&self.keys().join(key), &[]).await
    }
}
