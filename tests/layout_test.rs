mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_upsert_creates_then_updates() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;
    let equipment = factory.create_equipment("Microscope A").await;

    // First save creates
    let created = app
        .server
        .put(&format!("/api/layout/equipment/{}", equipment.id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "x_position": 10, "y_position": 20 }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = created.json();
    assert_eq!(body["x_position"].as_i64().unwrap(), 10);
    // Defaults apply when width/height are omitted
    assert_eq!(body["width"].as_i64().unwrap(), 150);
    assert_eq!(body["height"].as_i64().unwrap(), 100);

    // Second save updates in place
    let updated = app
        .server
        .put(&format!("/api/layout/equipment/{}", equipment.id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "x_position": 50, "y_position": 60, "width": 200 }))
        .await;
    updated.assert_status(StatusCode::OK);
    let body: serde_json::Value = updated.json();
    assert_eq!(body["x_position"].as_i64().unwrap(), 50);
    assert_eq!(body["width"].as_i64().unwrap(), 200);

    // Still a single entry for this equipment
    let all = app
        .server
        .get("/api/layout")
        .add_header("Authorization", auth.auth_header())
        .await;
    let body: serde_json::Value = all.json();
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_upsert_missing_position() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;
    let equipment = factory.create_equipment("Microscope A").await;

    let response = app
        .server
        .put(&format!("/api/layout/equipment/{}", equipment.id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "x_position": 10 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upsert_unknown_equipment() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;

    let response = app
        .server
        .put("/api/layout/equipment/999")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "x_position": 10, "y_position": 20 }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bulk_save() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;
    let microscope = factory.create_equipment("Microscope A").await;
    let centrifuge = factory.create_equipment("Centrifuge B").await;

    let response = app
        .server
        .post("/api/layout")
        .add_header("Authorization", auth.auth_header())
        .json(&json!([
            { "equipment_id": microscope.id, "x_position": 0, "y_position": 0 },
            { "equipment_id": centrifuge.id, "x_position": 300, "y_position": 150, "width": 120, "height": 80 }
        ]))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);

    let get = app
        .server
        .get(&format!("/api/layout/equipment/{}", centrifuge.id))
        .add_header("Authorization", auth.auth_header())
        .await;
    get.assert_status(StatusCode::OK);
    let body: serde_json::Value = get.json();
    assert_eq!(body["width"].as_i64().unwrap(), 120);
}

#[tokio::test]
async fn test_delete_layout() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;
    let equipment = factory.create_equipment("Microscope A").await;

    app.server
        .put(&format!("/api/layout/equipment/{}", equipment.id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "x_position": 10, "y_position": 20 }))
        .await
        .assert_status(StatusCode::CREATED);

    let deleted = app
        .server
        .delete(&format!("/api/layout/equipment/{}", equipment.id))
        .add_header("Authorization", auth.auth_header())
        .await;
    deleted.assert_status(StatusCode::OK);

    let get = app
        .server
        .get(&format!("/api/layout/equipment/{}", equipment.id))
        .add_header("Authorization", auth.auth_header())
        .await;
    get.assert_status(StatusCode::NOT_FOUND);
}
