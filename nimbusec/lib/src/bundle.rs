//! Bundles: the purchasable scan packages a domain is assigned to.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::client::NimbusecClient;
use crate::error::ApiError;
use crate::resource::{Collection, Resource, Writable};
use crate::timestamp::Timestamp;

/// Collection path of bundles.
const BUNDLE_PATH: &str = "/v2/bundle";

/// Identifier of a bundle.
///
/// Records carry a numeric id, while a [`Domain`](crate::Domain) refers to
/// its bundle by a string in its `bundle` field. Both forms address the
/// same path segment.
///
/// ## Examples
///
/// ```rust
/// use nimbusec::BundleId;
///
/// assert_eq!(BundleId::from(5).to_string(), "5");
/// assert_eq!(BundleId::from("b-basic").to_string(), "b-basic");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BundleId {
    /// Id as returned in bundle records.
    Number(i64),
    /// Id as referenced from a domain.
    Name(String),
}

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleId::Number(id) => write!(f, "{id}"),
            BundleId::Name(id) => f.write_str(id),
        }
    }
}

impl From<i64> for BundleId {
    fn from(id: i64) -> Self {
        BundleId::Number(id)
    }
}

impl From<&str> for BundleId {
    fn from(id: &str) -> Self {
        BundleId::Name(id.to_string())
    }
}

impl From<String> for BundleId {
    fn from(id: String) -> Self {
        BundleId::Name(id)
    }
}

/// A scan package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bundle {
    /// Unique identifier, assigned by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<BundleId>,
    /// Display name.
    pub name: String,
    /// Start of the subscription.
    pub start_date: Timestamp,
    /// End of the subscription.
    pub end_date: Timestamp,
    /// Storage quota, e.g. `1 GB`.
    pub quota: String,
    /// Crawl depth.
    pub depth: i32,
    /// Fast scan interval.
    pub fast: i32,
    /// Deep scan interval.
    pub deep: i32,
    /// Number of domains the bundle covers.
    pub contingent: i32,
    /// Number of domains currently assigned.
    pub active: i32,
    /// Scan engines included.
    pub engines: Vec<String>,
    /// Price.
    pub amount: i64,
    /// Currency of `amount`.
    pub currency: String,
}

impl Resource for Bundle {
    const KIND: &'static str = "bundle";
    type Id = BundleId;

    fn id(&self) -> Option<BundleId> {
        self.id.clone()
    }
}

impl Writable for Bundle {}

/// Handle on the bundle collection.
#[derive(Debug, Clone)]
pub struct Bundles<'a> {
    inner: Collection<'a, Bundle>,
}

impl<'a> Deref for Bundles<'a> {
    type Target = Collection<'a, Bundle>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<'a> Bundles<'a> {
    pub(crate) fn new(client: &'a NimbusecClient) -> Self {
        Self {
            inner: Collection::new(client, BUNDLE_PATH),
        }
    }

    /// Looks up the bundle with exactly this name.
    pub async fn get_by_name(&self, name: &str) -> Result<Bundle, ApiError> {
        self.inner.find_one("name", name).await
    }

    /// Deletes a bundle.
    pub async fn delete(&self, id: impl Into<BundleId>) -> Result<(), ApiError> {
        self.inner.remove(&id.into(), &[]).await
    }
}

impl NimbusecClient {
    /// Returns a handle on the bundle collection.
    pub fn bundles(&self) -> Bundles<'_> {
        Bundles::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_bundle() {
        let bundle: Bundle = serde_json::from_value(json!({
            "id": 5,
            "name": "Basic",
            "startDate": 1_500_000_000_000_i64,
            "endDate": 1_531_536_000_000_i64,
            "contingent": 5,
            "engines": ["malware", "blacklist"],
            "amount": 990,
            "currency": "EUR"
        }))
        .unwrap();

        assert_eq!(bundle.id, Some(BundleId::Number(5)));
        assert_eq!(bundle.start_date.as_millis(), 1_500_000_000_000);
        assert_eq!(bundle.engines, vec!["malware", "blacklist"]);
    }

    #[test]
    fn test_string_id_is_accepted() {
        let bundle: Bundle = serde_json::from_value(json!({ "id": "b-basic" })).unwrap();
        assert_eq!(bundle.id, Some(BundleId::from("b-basic")));
    }

    #[test]
    fn test_numeric_id_serializes_as_number() {
        let bundle = Bundle {
            id: Some(BundleId::from(5)),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&bundle).unwrap()["id"], json!(5));
        assert_eq!(Resource::id(&bundle).map(|id| id.to_string()).as_deref(), Some("5"));
    }
}
