//! Client behaviour against a mock roster server.

use roster_client::{RosterClient, RosterClientError};
use roster_core::ValidationError;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(id: Uuid, name: &str, email: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "createdAt": "2026-01-02T03:04:05Z",
    })
}

#[test]
fn trailing_slash_is_trimmed() {
    let client = RosterClient::connect("http://localhost:8080/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}

#[tokio::test]
async fn list_users_unwraps_envelope() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [user_json(id, "Ann", "ann@x.com")],
            "error": null,
        })))
        .mount(&server)
        .await;

    let client = RosterClient::connect(&server.uri()).unwrap();
    let users = client.list_users().await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, id);
    assert_eq!(users[0].email, "ann@x.com");
    assert_eq!(
        users[0].created_at,
        "2026-01-02T03:04:05Z".parse::<chrono::DateTime<chrono::Utc>>().unwrap()
    );
}

#[tokio::test]
async fn create_user_posts_name_and_email() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(json!({ "name": "Ann", "email": "ann@x.com" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": user_json(id, "Ann", "ann@x.com"),
            "error": null,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = RosterClient::connect(&server.uri()).unwrap();
    let user = client.create_user("Ann", "ann@x.com").await.unwrap();

    assert_eq!(user.id, id);
}

#[tokio::test]
async fn invalid_email_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = RosterClient::connect(&server.uri()).unwrap();
    let err = client.create_user("Ann", "not-an-email").await.unwrap_err();

    assert!(matches!(
        err,
        RosterClientError::Invalid(ValidationError::InvalidFormat)
    ));
}

#[tokio::test]
async fn empty_name_is_rejected_locally() {
    let client = RosterClient::connect("http://127.0.0.1:9").unwrap();
    let err = client
        .update_user(Uuid::new_v4(), "", "ann@x.com")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RosterClientError::Invalid(ValidationError::MissingField)
    ));
}

#[tokio::test]
async fn conflict_maps_to_duplicate_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "data": null,
            "error": "Email already exists",
        })))
        .mount(&server)
        .await;

    let client = RosterClient::connect(&server.uri()).unwrap();
    let err = client.create_user("Ann", "ann@x.com").await.unwrap_err();

    assert!(matches!(err, RosterClientError::DuplicateEmail));
}

#[tokio::test]
async fn missing_user_maps_to_not_found() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("DELETE"))
        .and(path(format!("/api/users/{id}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "data": null,
            "error": "User not found",
        })))
        .mount(&server)
        .await;

    let client = RosterClient::connect(&server.uri()).unwrap();
    let err = client.delete_user(id).await.unwrap_err();

    assert!(matches!(err, RosterClientError::NotFound));
}

#[tokio::test]
async fn server_failure_carries_envelope_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "data": null,
            "error": "Failed to fetch users",
        })))
        .mount(&server)
        .await;

    let client = RosterClient::connect(&server.uri()).unwrap();
    match client.list_users().await.unwrap_err() {
        RosterClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Failed to fetch users");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn delete_succeeds_on_null_data() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("DELETE"))
        .and(path(format!("/api/users/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": null,
            "error": null,
        })))
        .mount(&server)
        .await;

    let client = RosterClient::connect(&server.uri()).unwrap();
    client.delete_user(id).await.unwrap();
}

#[tokio::test]
async fn trigger_workflow_returns_relay_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/n8n-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "message": "Workflow was started" },
            "error": null,
        })))
        .mount(&server)
        .await;

    let client = RosterClient::connect(&server.uri()).unwrap();
    let data = client.trigger_workflow("Ann", "ann@x.com").await.unwrap();

    assert_eq!(data, json!({ "message": "Workflow was started" }));
}
