#![allow(dead_code)]

use nimbusec::NimbusecClient;
use wiremock::MockServer;

pub const ERROR_HEADER: &str = "x-nimbusec-error";

/// Starts a mock API and a client pointed at it.
pub async fn setup() -> (MockServer, NimbusecClient) {
    let server = MockServer::start().await;
    let client = NimbusecClient::new(server.uri(), "test-key", "test-secret").unwrap();
    (server, client)
}
