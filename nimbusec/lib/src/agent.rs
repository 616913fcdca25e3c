//! Server agent binaries.

use serde::{Deserialize, Serialize};

use crate::client::NimbusecClient;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::filter::Filter;

/// Path listing the available agent builds.
const AGENT_PATH: &str = "/v2/agent/download";

/// One downloadable agent build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
    /// Target operating system, e.g. `linux`.
    pub os: String,
    /// Target architecture, e.g. `64bit`.
    pub arch: String,
    /// Build number.
    pub version: i64,
    /// MD5 digest of the archive.
    pub md5: String,
    /// SHA-1 digest of the archive.
    pub sha1: String,
    /// Archive format, e.g. `zip`.
    pub format: String,
    /// Download location advertised by the service.
    pub url: String,
}

impl Agent {
    /// Returns the download file name, `nimbusagent-{os}-{arch}-v{version}.{format}`.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use nimbusec::Agent;
    ///
    /// let agent = Agent {
    ///     os: "linux".into(),
    ///     arch: "64bit".into(),
    ///     version: 3,
    ///     format: "zip".into(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(agent.file_name(), "nimbusagent-linux-64bit-v3.zip");
    /// ```
    pub fn file_name(&self) -> String {
        format!(
            "nimbusagent-{}-{}-v{}.{}",
            self.os, self.arch, self.version, self.format
        )
    }
}

/// Handle on the agent downloads.
#[derive(Debug, Clone, Copy)]
pub struct Agents<'a> {
    client: &'a NimbusecClient,
}

impl<'a> Agents<'a> {
    pub(crate) fn new(client: &'a NimbusecClient) -> Self {
        Self { client }
    }

    /// Lists the agent builds matching `filter`.
    pub async fn find(&self, filter: impl Into<Filter>) -> Result<Vec<Agent>, ApiError> {
        let filter = filter.into();
        let query: Vec<(&str, &str)> = filter.query().into_iter().collect();
        self.client.get(&Endpoint::new(AGENT_PATH), &query).await
    }

    /// Downloads the binary archive of `agent`.
    pub async fn download(&self, agent: &Agent) -> Result<Vec<u8>, ApiError> {
        let endpoint = Endpoint::new(AGENT_PATH).join(agent.file_name());
        self.client.get_bytes(&endpoint, &[]).await
    }
}

impl NimbusecClient {
    /// Returns a handle on the agent downloads.
    pub fn agents(&self) -> Agents<'_> {
        Agents::new(self)
    }
}
