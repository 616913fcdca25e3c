//! Users of the tenant account and their domain restrictions.

use std::convert::Infallible;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::client::NimbusecClient;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::resource::{Collection, Resource, Writable};

/// Collection path of users.
const USER_PATH: &str = "/v2/user";

/// Permission level of a user.
///
/// The service sends the role as a plain string. Values other than `user`
/// and `administrator` (including the empty string) are kept verbatim in
/// [`Role::Other`] so a record always decodes and is written back unchanged.
///
/// ## Examples
///
/// ```rust
/// use nimbusec::Role;
///
/// assert_eq!("administrator".parse::<Role>().unwrap(), Role::Administrator);
/// assert_eq!(Role::from(String::new()), Role::Other(String::new()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Sees only the domains linked to them.
    #[default]
    User,
    /// Manages the whole account.
    Administrator,
    /// A role this client has no variant for.
    Other(String),
}

impl Role {
    /// Returns the wire form of the role.
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Administrator => "administrator",
            Role::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => Role::User,
            "administrator" => Role::Administrator,
            _ => Role::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::from(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user of the tenant account.
///
/// `password` and `signature_key` are write-only: they are sent when set and
/// the service never returns them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// Unique identifier, assigned by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Login name.
    pub login: String,
    /// Address for mail notifications.
    pub mail: String,
    /// Permission level.
    pub role: Role,
    /// Company the user works for.
    pub company: String,
    /// Family name.
    pub surname: String,
    /// Given name.
    pub forename: String,
    /// Academic title.
    pub title: String,
    /// Phone number for SMS notifications.
    pub mobile: String,
    /// Login password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Secret for single sign-on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_key: Option<String>,
}

impl Resource for User {
    const KIND: &'static str = "user";
    type Id = i64;

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Writable for User {}

/// Handle on the user collection.
///
/// Dereferences to [`Collection<User>`] for the uniform operations.
#[derive(Debug, Clone)]
pub struct Users<'a> {
    inner: Collection<'a, User>,
}

impl<'a> Deref for Users<'a> {
    type Target = Collection<'a, User>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a NimbusecClient) -> Self {
        Self {
            inner: Collection::new(client, USER_PATH),
        }
    }

    fn linked(&self, user: i64) -> Endpoint {
        Endpoint::new("/v2/user/{user}/domains").param("user", user)
    }

    /// Looks up the user with exactly this login.
    ///
    /// ## Errors
    ///
    /// Returns a [`LookupError`](crate::error::LookupError) if no user or
    /// more than one user has this login.
    pub async fn get_by_login(&self, login: &str) -> Result<User, ApiError> {
        self.inner.find_one("login", login).await
    }

    /// Deletes a user.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.inner.remove(&id, &[]).await
    }

    /// Lists the ids of the domains `user` is restricted to.
    pub async fn domains(&self, user: i64) -> Result<Vec<i64>, ApiError> {
        self.inner.client().get(&self.linked(user), &[]).await
    }

    /// Grants `user` access to `domain`.
    pub async fn link_domain(&self, user: i64, domain: i64) -> Result<(), ApiError> {
        self.inner
            .client()
            .post_discarding(&self.linked(user), &[], &domain)
            .await
    }

    /// Revokes the access of `user` to `domain`.
    pub async fn unlink_domain(&self, user: i64, domain: i64) -> Result<(), ApiError> {
        self.inner
            .client()
            .delete(&self.linked(user).join(domain), &[])
            .await
    }

    /// Replaces the whole set of domains `user` may access.
    pub async fn set_domains(&self, user: i64, domains: &[i64]) -> Result<(), ApiError> {
        self.inner
            .client()
            .put_discarding(&self.linked(user), &[], domains)
            .await
    }
}

impl NimbusecClient {
    /// Returns a handle on the user collection.
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }
}
