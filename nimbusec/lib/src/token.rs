//! Agent tokens: the OAuth credentials a server agent reports with.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::client::NimbusecClient;
use crate::error::ApiError;
use crate::resource::{Collection, Resource, Writable};
use crate::timestamp::Timestamp;

/// Collection path of agent tokens.
const TOKEN_PATH: &str = "/v2/agent/token";

/// Credentials of one server agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Token {
    /// Unique identifier, assigned by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Name given to the token.
    pub name: String,
    /// OAuth key, issued by the service.
    pub key: String,
    /// OAuth secret, issued by the service.
    pub secret: String,
    /// Last time an agent used the token.
    pub last_call: Timestamp,
    /// Last agent version seen with this token.
    pub version: i64,
}

impl Resource for Token {
    const KIND: &'static str = "token";
    type Id = i64;

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Writable for Token {}

/// Handle on the agent token collection.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    inner: Collection<'a, Token>,
}

impl<'a> Deref for Tokens<'a> {
    type Target = Collection<'a, Token>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(client: &'a NimbusecClient) -> Self {
        Self {
            inner: Collection::new(client, TOKEN_PATH),
        }
    }

    /// Looks up the token with exactly this name.
    pub async fn get_by_name(&self, name: &str) -> Result<Token, ApiError> {
        self.inner.find_one("name", name).await
    }

    /// Deletes a token. Agents using it can no longer report.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.inner.remove(&id, &[]).await
    }
}

impl NimbusecClient {
    /// Returns a handle on the agent token collection.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens::new(self)
    }
}
