//! The uniform per-resource vocabulary.
//!
//! Every collection the API exposes (domains, users, bundles, tokens, scan
//! results) supports the same operations: create, upsert, fetch by id,
//! search by filter, replace and delete. [`Collection`] implements them once
//! for any [`Resource`]; the per-resource modules only add what is specific
//! to them.

use std::fmt::Display;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::{NimbusecClient, Query};
use crate::endpoint::Endpoint;
use crate::error::{ApiError, ConfigError, LookupError};
use crate::filter::Filter;

/// Query parameter selecting the create-or-update behaviour of a POST.
const UPSERT_PARAM: &str = "upsert";

/// A record type stored in a remote collection.
pub trait Resource: DeserializeOwned + Send + Sync {
    /// Human-readable kind used in lookup errors, e.g. `"domain"`.
    const KIND: &'static str;

    /// Identifier type used in item paths.
    type Id: Display + Send + Sync;

    /// Returns the server-assigned identifier, if the record has one.
    fn id(&self) -> Option<Self::Id>;
}

/// A resource whose records can be created and replaced by clients.
pub trait Writable: Resource + Serialize {}

/// Handle on one remote collection of `R` records.
///
/// Handles are cheap borrowed views; create them through the client, e.g.
/// [`NimbusecClient::domains`].
pub struct Collection<'a, R> {
    client: &'a NimbusecClient,
    path: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R> std::fmt::Debug for Collection<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl<R> Clone for Collection<'_, R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client,
            path: self.path.clone(),
            _resource: PhantomData,
        }
    }
}

impl<'a, R: Resource> Collection<'a, R> {
    /// Creates a handle on the collection at `path`, e.g. `/v2/domain`.
    pub fn new(client: &'a NimbusecClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _resource: PhantomData,
        }
    }

    /// Returns the collection path.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn client(&self) -> &'a NimbusecClient {
        self.client
    }

    fn collection(&self) -> Endpoint {
        Endpoint::new(self.path.as_str())
    }

    fn item(&self, id: &R::Id) -> Endpoint {
        self.collection().join(id)
    }

    /// Fetches one record by id.
    ///
    /// ## Errors
    ///
    /// An unknown id is reported by the service, typically as a 404
    /// [`ApiError::Service`].
    pub async fn get(&self, id: impl Into<R::Id>) -> Result<R, ApiError> {
        self.client.get(&self.item(&id.into()), &[]).await
    }

    /// Lists the records matching `filter`.
    ///
    /// The empty filter sends no `q` parameter and lists everything.
    pub async fn find(&self, filter: impl Into<Filter>) -> Result<Vec<R>, ApiError> {
        let filter = filter.into();
        let query: Vec<(&str, &str)> = filter.query().into_iter().collect();
        self.client.get(&self.collection(), &query).await
    }

    /// Looks up the single record whose `field` equals `value`.
    ///
    /// ## Errors
    ///
    /// Returns [`LookupError::NotFound`] when nothing matches and
    /// [`LookupError::Ambiguous`] when more than one record matches.
    pub async fn find_one(&self, field: &'static str, value: &str) -> Result<R, ApiError> {
        let mut matches = self.find(Filter::equals(field, value)).await?;
        debug!(kind = R::KIND, field, count = matches.len(), "exactly-one lookup");

        match matches.len() {
            0 => Err(LookupError::NotFound {
                kind: R::KIND,
                field,
                value: value.to_string(),
            }
            .into()),
            1 => Ok(matches.swap_remove(0)),
            count => Err(LookupError::Ambiguous {
                kind: R::KIND,
                field,
                value: value.to_string(),
                count,
            }
            .into()),
        }
    }

    /// Deletes the record `id`, passing extra query parameters.
    pub(crate) async fn remove(&self, id: &R::Id, query: &Query<'_>) -> Result<(), ApiError> {
        self.client.delete(&self.item(id), query).await
    }
}

impl<R: Writable> Collection<'_, R> {
    /// Creates a record. The service assigns the id.
    pub async fn create(&self, record: &R) -> Result<R, ApiError> {
        self.client.post(&self.collection(), &[], record).await
    }

    /// Creates a record, or replaces the existing one with the same natural key.
    pub async fn create_or_update(&self, record: &R) -> Result<R, ApiError> {
        self.client
            .post(&self.collection(), &[(UPSERT_PARAM, "true")], record)
            .await
    }

    /// Creates a record, or returns the existing one with the same natural key
    /// unchanged.
    pub async fn create_or_get(&self, record: &R) -> Result<R, ApiError> {
        self.client
            .post(&self.collection(), &[(UPSERT_PARAM, "false")], record)
            .await
    }

    /// Replaces a record. The id is taken from the record itself.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingField`] if the record has no id.
    pub async fn update(&self, record: &R) -> Result<R, ApiError> {
        let id = record.id().ok_or(ConfigError::missing_field("id"))?;
        self.client.put(&self.item(&id), &[], record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Widget {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<i64>,
        name: String,
    }

    impl Resource for Widget {
        const KIND: &'static str = "widget";
        type Id = i64;

        fn id(&self) -> Option<i64> {
            self.id
        }
    }

    impl Writable for Widget {}

    fn widget(id: i64, name: &str) -> Widget {
        Widget {
            id: Some(id),
            name: name.to_string(),
        }
    }

    async fn setup() -> (MockServer, NimbusecClient) {
        let server = MockServer::start().await;
        let client = NimbusecClient::new(server.uri(), "key", "secret").unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn test_find_empty_filter_sends_no_query() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v2/widget"))
            .and(query_param_is_missing("q"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![widget(1, "a")]))
            .expect(2)
            .mount(&server)
            .await;

        let widgets = Collection::<Widget>::new(&client, "/v2/widget");
        assert_eq!(widgets.find(Filter::empty()).await.unwrap().len(), 1);
        assert_eq!(widgets.find("").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_one_outcomes() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v2/widget"))
            .and(query_param("q", r#"name eq "none""#))
            .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<Widget>::new()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/widget"))
            .and(query_param("q", r#"name eq "one""#))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![widget(1, "one")]))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/widget"))
            .and(query_param("q", r#"name eq "two""#))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(vec![widget(1, "two"), widget(2, "two")]),
            )
            .mount(&server)
            .await;

        let widgets = Collection::<Widget>::new(&client, "/v2/widget");

        let err = widgets.find_one("name", "none").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, ApiError::Lookup(LookupError::NotFound { kind: "widget", .. })));

        assert_eq!(widgets.find_one("name", "one").await.unwrap(), widget(1, "one"));

        let err = widgets.find_one("name", "two").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Lookup(LookupError::Ambiguous { count: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_upsert_flags() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/v2/widget"))
            .and(query_param("upsert", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(widget(1, "a")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2/widget"))
            .and(query_param("upsert", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(widget(1, "a")))
            .expect(1)
            .mount(&server)
            .await;

        let widgets = Collection::<Widget>::new(&client, "/v2/widget");
        let draft = Widget {
            id: None,
            name: "a".to_string(),
        };
        widgets.create_or_update(&draft).await.unwrap();
        widgets.create_or_get(&draft).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_omits_unset_id() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/v2/widget"))
            .and(query_param_is_missing("upsert"))
            .and(body_json(serde_json::json!({ "name": "fresh" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(widget(3, "fresh")))
            .mount(&server)
            .await;

        let widgets = Collection::<Widget>::new(&client, "/v2/widget");
        let created = widgets
            .create(&Widget {
                id: None,
                name: "fresh".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(created.id, Some(3));
    }

    #[tokio::test]
    async fn test_update_uses_record_id() {
        let (server, client) = setup().await;

        Mock::given(method("PUT"))
            .and(path("/v2/widget/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(widget(9, "renamed")))
            .mount(&server)
            .await;

        let widgets = Collection::<Widget>::new(&client, "/v2/widget");
        let updated = widgets.update(&widget(9, "renamed")).await.unwrap();
        assert_eq!(updated.name, "renamed");
    }

    #[tokio::test]
    async fn test_update_without_id() {
        let (_server, client) = setup().await;

        let widgets = Collection::<Widget>::new(&client, "/v2/widget");
        let err = widgets.update(&Widget::default()).await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::Config(ConfigError::MissingField { field: "id" })
        ));
    }
}
