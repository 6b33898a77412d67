mod common;

use axum::http::StatusCode;
use serde_json::json;
use time::{Duration, OffsetDateTime};

use common::{Factory, TestApp};

#[tokio::test]
async fn test_create_equipment() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;

    let response = app
        .server
        .post("/api/equipment")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "name": "Microscope A",
            "type": "microscope",
            "description": "Confocal, room 204"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Microscope A");
    assert_eq!(body["type"].as_str().unwrap(), "microscope");
    assert!(body["active"].as_bool().unwrap());
    assert!(!body["in_use"].as_bool().unwrap());
}

#[tokio::test]
async fn test_create_equipment_missing_name() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;

    let response = app
        .server
        .post("/api/equipment")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "type": "microscope" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_equipment_shows_current_occupancy() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;
    let equipment = factory.create_equipment("Microscope A").await;
    let idle = factory.create_equipment("Centrifuge B").await;

    // Reservation covering the current instant
    let now = OffsetDateTime::now_utc();
    factory
        .create_reservation(
            auth.user_id,
            equipment.id,
            now - Duration::minutes(10),
            now + Duration::minutes(20),
        )
        .await;

    let response = app
        .server
        .get("/api/equipment")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);

    let busy = items
        .iter()
        .find(|e| e["id"].as_i64() == Some(equipment.id))
        .unwrap();
    assert!(busy["in_use"].as_bool().unwrap());
    assert_eq!(busy["current_user"].as_i64().unwrap(), auth.user_id);

    let free = items
        .iter()
        .find(|e| e["id"].as_i64() == Some(idle.id))
        .unwrap();
    assert!(!free["in_use"].as_bool().unwrap());
    assert!(free["current_user"].is_null());
}

#[tokio::test]
async fn test_get_unknown_equipment() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;

    let response = app
        .server
        .get("/api/equipment/999")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_equipment() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;
    let equipment = factory.create_equipment("Microscope A").await;

    let response = app
        .server
        .put(&format!("/api/equipment/{}", equipment.id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({ "name": "Microscope A (repaired)", "active": false }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Microscope A (repaired)");
    assert!(!body["active"].as_bool().unwrap());
}

#[tokio::test]
async fn test_update_equipment_no_fields() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;
    let equipment = factory.create_equipment("Microscope A").await;

    let response = app
        .server
        .put(&format!("/api/equipment/{}", equipment.id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_equipment_cascades() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;
    let equipment = factory.create_equipment("Microscope A").await;
    let reservation = factory
        .create_reservation(
            auth.user_id,
            equipment.id,
            time::macros::datetime!(2025-03-01 10:00 UTC),
            time::macros::datetime!(2025-03-01 11:00 UTC),
        )
        .await;

    let response = app
        .server
        .delete(&format!("/api/equipment/{}", equipment.id))
        .add_header("Authorization", auth.auth_header())
        .await;
    response.assert_status(StatusCode::OK);

    let get = app
        .server
        .get(&format!("/api/reservations/{}", reservation.id))
        .add_header("Authorization", auth.auth_header())
        .await;
    get.assert_status(StatusCode::NOT_FOUND);
}
