//! Integration tests for the Taskboard Server API
//!
//! These tests verify the complete request/response cycle for all endpoints.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use taskboard_server::db::MemoryStore;
use taskboard_server::{build_router, AppState, Config, Repository, StorageDriver};

// =============================================================================
// Test Helpers
// =============================================================================

/// Create a test configuration
fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        storage_driver: StorageDriver::Memory,
        data_path: PathBuf::new(),
        allowed_origins: vec!["http://localhost:3000".to_string()],
        task_timeout: None,
        environment: "test".to_string(),
    }
}

/// Create a test app router over a fresh in-memory repository
fn create_test_app() -> Router {
    let repo = Repository::new(Arc::new(MemoryStore::new()));
    build_router(AppState::new(repo, test_config()))
}

/// Parse response body as JSON
async fn body_to_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a request with a JSON body
fn make_json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Create a GET request
fn make_get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Send a request and return (status, json body)
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

/// Register an account and return its id
async fn setup_account(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        make_json_request(
            "POST",
            "/api/accounts",
            json!({ "email": email, "password": "secret1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

/// Add a board and return its JSON representation
async fn setup_board(app: &Router, account_id: &str, name: &str) -> Value {
    let (status, body) = send(
        app,
        make_json_request(
            "POST",
            &format!("/api/accounts/{}/boards", account_id),
            json!({ "name": name, "color": "red" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check_returns_healthy() {
    let app = create_test_app();

    let (status, body) = send(&app, make_get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["pendingTasks"], 0);
    assert!(body["version"].as_str().is_some());
}

// =============================================================================
// Account Tests
// =============================================================================

#[tokio::test]
async fn test_register_account_success() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        make_json_request(
            "POST",
            "/api/accounts",
            json!({ "email": "a@x.com", "password": "secret1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x.com");
    assert!(body["id"].as_str().is_some());
    assert!(body.get("hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_returns_conflict() {
    let app = create_test_app();
    setup_account(&app, "a@x.com").await;

    let (status, body) = send(
        &app,
        make_json_request(
            "POST",
            "/api/accounts",
            json!({ "email": "a@x.com", "password": "another1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        make_json_request(
            "POST",
            "/api/accounts",
            json!({ "email": "not-an-email", "password": "secret1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter a valid email address.");
}

#[tokio::test]
async fn test_register_short_password() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        make_json_request(
            "POST",
            "/api/accounts",
            json!({ "email": "a@x.com", "password": "123" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password must be at least 6 characters.");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = create_test_app();

    let (status, body) = send(&app, make_json_request("POST", "/api/accounts", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email is required");
}

#[tokio::test]
async fn test_verify_account() {
    let app = create_test_app();
    let account_id = setup_account(&app, "b@x.com").await;

    let (status, body) = send(
        &app,
        make_json_request(
            "POST",
            "/api/accounts/verify",
            json!({ "email": "b@x.com", "password": "secret1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], account_id.as_str());

    let (status, body) = send(
        &app,
        make_json_request(
            "POST",
            "/api/accounts/verify",
            json!({ "email": "b@x.com", "password": "wrong-password" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, _) = send(
        &app,
        make_json_request(
            "POST",
            "/api/accounts/verify",
            json!({ "email": "nobody@x.com", "password": "secret1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Board Tests
// =============================================================================

#[tokio::test]
async fn test_add_and_list_boards() {
    let app = create_test_app();
    let account_id = setup_account(&app, "c@x.com").await;

    let board = setup_board(&app, &account_id, "Roadmap").await;
    assert_eq!(board["name"], "Roadmap");
    assert_eq!(board["color"], "red");
    assert_eq!(board["createdAt"], board["updatedAt"]);

    let (status, body) = send(
        &app,
        make_get_request(&format!("/api/accounts/{}/boards", account_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], board["id"]);
}

#[tokio::test]
async fn test_add_board_requires_name() {
    let app = create_test_app();
    let account_id = setup_account(&app, "c2@x.com").await;

    let (status, body) = send(
        &app,
        make_json_request(
            "POST",
            &format!("/api/accounts/{}/boards", account_id),
            json!({ "name": "  ", "color": "red" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Board name is required");
}

#[tokio::test]
async fn test_boards_of_unknown_account() {
    let app = create_test_app();

    let (status, body) = send(&app, make_get_request("/api/accounts/ghost/boards")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Account not found");
}

#[tokio::test]
async fn test_update_board_with_stale_token() {
    let app = create_test_app();
    let account_id = setup_account(&app, "d@x.com").await;
    let board = setup_board(&app, &account_id, "Roadmap").await;
    let uri = format!(
        "/api/accounts/{}/boards/{}",
        account_id,
        board["id"].as_str().unwrap()
    );

    let (status, updated) = send(
        &app,
        make_json_request(
            "PUT",
            &uri,
            json!({ "updatedAt": board["updatedAt"], "name": "Plan", "color": "blue" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Plan");
    assert!(updated["updatedAt"].as_i64().unwrap() > board["updatedAt"].as_i64().unwrap());

    // Reusing the old token is rejected
    let (status, body) = send(
        &app,
        make_json_request(
            "PUT",
            &uri,
            json!({ "updatedAt": board["updatedAt"], "name": "Other", "color": "green" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("modified"));
}

#[tokio::test]
async fn test_update_missing_board() {
    let app = create_test_app();
    let account_id = setup_account(&app, "e@x.com").await;

    let (status, body) = send(
        &app,
        make_json_request(
            "PUT",
            &format!("/api/accounts/{}/boards/no-such-board", account_id),
            json!({ "updatedAt": 0, "name": "Plan", "color": "blue" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Board not found");
}

#[tokio::test]
async fn test_purge_boards() {
    let app = create_test_app();
    let account_id = setup_account(&app, "f@x.com").await;
    let keep = setup_board(&app, &account_id, "Keep").await;
    let drop_me = setup_board(&app, &account_id, "Drop").await;
    let uri = format!("/api/accounts/{}/boards", account_id);

    let (status, body) = send(
        &app,
        make_json_request("DELETE", &uri, json!({ "ids": ["unknown"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["purged"], 0);

    let (status, body) = send(
        &app,
        make_json_request("DELETE", &uri, json!({ "ids": [drop_me["id"]] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["purged"], 1);

    let (_, body) = send(&app, make_get_request(&uri)).await;
    let boards = body.as_array().unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0]["id"], keep["id"]);
}
