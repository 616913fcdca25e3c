//! User operations against a mock API.

mod common;

use common::setup;
use nimbusec::{ApiError, LookupError, Role, User};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn create_sends_password_only_when_set() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/user"))
        .and(body_json(json!({
            "login": "jane",
            "mail": "jane@example.com",
            "role": "administrator",
            "company": "",
            "surname": "Doe",
            "forename": "Jane",
            "title": "",
            "mobile": "",
            "password": "s3cret",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "login": "jane",
            "mail": "jane@example.com",
            "role": "administrator",
            "surname": "Doe",
            "forename": "Jane",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .users()
        .create(&User {
            login: "jane".to_string(),
            mail: "jane@example.com".to_string(),
            role: Role::Administrator,
            surname: "Doe".to_string(),
            forename: "Jane".to_string(),
            password: Some("s3cret".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(created.id, Some(5));
    assert_eq!(created.password, None);
}

#[tokio::test]
async fn get_by_login_outcomes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/user"))
        .and(query_param("q", "login eq \"nobody\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/user"))
        .and(query_param("q", "login eq \"jane\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 5, "login": "jane" }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/user"))
        .and(query_param("q", "login eq \"dup\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 6, "login": "dup" },
            { "id": 7, "login": "dup" },
            { "id": 8, "login": "dup" },
        ])))
        .mount(&server)
        .await;

    let users = client.users();

    assert!(matches!(
        users.get_by_login("nobody").await,
        Err(ApiError::Lookup(LookupError::NotFound { kind: "user", field: "login", .. }))
    ));
    assert_eq!(users.get_by_login("jane").await.unwrap().id, Some(5));
    assert!(matches!(
        users.get_by_login("dup").await,
        Err(ApiError::Lookup(LookupError::Ambiguous { count: 3, .. }))
    ));
}

#[tokio::test]
async fn domain_restrictions() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/user/5/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([42, 43])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/user/5/domains"))
        .and(body_json(json!(44)))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/user/5/domains/42"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v2/user/5/domains"))
        .and(body_json(json!([43, 44])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([43, 44])))
        .expect(1)
        .mount(&server)
        .await;

    let users = client.users();

    assert_eq!(users.domains(5).await.unwrap(), vec![42, 43]);
    users.link_domain(5, 44).await.unwrap();
    users.unlink_domain(5, 42).await.unwrap();
    users.set_domains(5, &[43, 44]).await.unwrap();
}

#[tokio::test]
async fn delete_user() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/user/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.users().delete(5).await.unwrap();
}
