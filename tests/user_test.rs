mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_create_user() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;

    let response = app
        .server
        .post("/api/users")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "username": "bob",
            "password": "password123",
            "name": "Bob",
            "email": "bob@example.com"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["username"].as_str().unwrap(), "bob");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_user_duplicate_username() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;

    let response = app
        .server
        .post("/api/users")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "username": "alice", "password": "password123" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_user_missing_password() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;

    let response = app
        .server
        .post("/api/users")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "username": "bob" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_and_get_users() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let alice = factory.create_user("alice").await;
    let bob = factory.create_user("bob").await;

    let list = app
        .server
        .get("/api/users")
        .add_header("Authorization", alice.auth_header())
        .await;
    list.assert_status(StatusCode::OK);
    let body: serde_json::Value = list.json();
    assert_eq!(body.as_array().unwrap().len(), 2);

    let get = app
        .server
        .get(&format!("/api/users/{}", bob.user_id))
        .add_header("Authorization", alice.auth_header())
        .await;
    get.assert_status(StatusCode::OK);
    let body: serde_json::Value = get.json();
    assert_eq!(body["username"].as_str().unwrap(), "bob");
}

#[tokio::test]
async fn test_update_user() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;

    let response = app
        .server
        .put(&format!("/api/users/{}", auth.user_id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "name": "Alice Cooper" }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Alice Cooper");
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let alice = factory.create_user("alice").await;
    let bob = factory.create_user("bob").await;

    let response = app
        .server
        .delete(&format!("/api/users/{}", bob.user_id))
        .add_header("Authorization", alice.auth_header())
        .await;
    response.assert_status(StatusCode::OK);

    let get = app
        .server
        .get(&format!("/api/users/{}", bob.user_id))
        .add_header("Authorization", alice.auth_header())
        .await;
    get.assert_status(StatusCode::NOT_FOUND);
}
