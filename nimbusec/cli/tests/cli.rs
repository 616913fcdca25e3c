use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    cargo_bin_cmd!("nimbusec")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("nimbusec security monitoring"))
        .stdout(predicate::str::contains("domains"))
        .stdout(predicate::str::contains("agents"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("nimbusec")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nimbusec"));
}

#[test]
fn test_domains_help_lists_operations() {
    cargo_bin_cmd!("nimbusec")
        .args(["domains", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("delete"));
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_missing_key_fails() {
    cargo_bin_cmd!("nimbusec")
        .env_remove("NIMBUSEC_KEY")
        .env_remove("NIMBUSEC_SECRET")
        .args(["domains", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NIMBUSEC_KEY"));
}

// ============================================================================
// Mock API Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_domains_list_prints_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/domain"))
        .and(query_param_is_missing("q"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 42, "name": "example.com", "scheme": "https" }
        ])))
        .mount(&server)
        .await;

    cargo_bin_cmd!("nimbusec")
        .args(["--url", &server.uri(), "--key", "k", "--secret", "s"])
        .args(["domains", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"example.com\""))
        .stdout(predicate::str::contains("\"id\": 42"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_filter_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/user"))
        .and(query_param("q", "role eq \"administrator\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("nimbusec")
        .args(["--url", &server.uri(), "--key", "k", "--secret", "s"])
        .args(["users", "list", "--filter", "role eq \"administrator\""])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_service_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/domain/7"))
        .respond_with(ResponseTemplate::new(404).insert_header("x-nimbusec-error", "domain not found"))
        .mount(&server)
        .await;

    cargo_bin_cmd!("nimbusec")
        .args(["--url", &server.uri(), "--key", "k", "--secret", "s"])
        .args(["domains", "get", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("domain not found"));
}
