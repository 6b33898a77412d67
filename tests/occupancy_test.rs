mod common;

use axum::http::StatusCode;
use time::macros::datetime;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_occupancy_grid() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;
    let equipment = factory.create_equipment("Microscope A").await;
    factory
        .create_reservation(
            auth.user_id,
            equipment.id,
            datetime!(2025-03-01 10:00 UTC),
            datetime!(2025-03-01 11:00 UTC),
        )
        .await;

    let response = app
        .server
        .get(&format!("/api/occupancy/{}?date=2025-03-01", equipment.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["equipment_id"].as_i64().unwrap(), equipment.id);
    assert_eq!(body["date"].as_str().unwrap(), "2025-03-01");

    let slots = body["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 48);

    let slot = |label: &str| {
        slots
            .iter()
            .find(|s| s["time"].as_str() == Some(label))
            .unwrap()
    };

    assert!(slot("10:00")["reserved"].as_bool().unwrap());
    assert!(slot("10:30")["reserved"].as_bool().unwrap());
    // Inclusive display semantics: the end instant still reads occupied
    assert!(slot("11:00")["reserved"].as_bool().unwrap());
    assert!(!slot("11:30")["reserved"].as_bool().unwrap());
    assert!(!slot("09:30")["reserved"].as_bool().unwrap());

    assert_eq!(slot("10:00")["user_id"].as_i64().unwrap(), auth.user_id);
    assert_eq!(slot("10:00")["username"].as_str().unwrap(), "alice");
    assert!(slot("11:30")["user_id"].is_null());
}

#[tokio::test]
async fn test_occupancy_other_date_empty() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;
    let equipment = factory.create_equipment("Microscope A").await;
    factory
        .create_reservation(
            auth.user_id,
            equipment.id,
            datetime!(2025-03-01 10:00 UTC),
            datetime!(2025-03-01 11:00 UTC),
        )
        .await;

    let response = app
        .server
        .get(&format!("/api/occupancy/{}?date=2025-03-02", equipment.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| !s["reserved"].as_bool().unwrap()));
}

#[tokio::test]
async fn test_occupancy_missing_date() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;
    let equipment = factory.create_equipment("Microscope A").await;

    let response = app
        .server
        .get(&format!("/api/occupancy/{}", equipment.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_occupancy_malformed_date() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;
    let equipment = factory.create_equipment("Microscope A").await;

    let response = app
        .server
        .get(&format!("/api/occupancy/{}?date=March+1st", equipment.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_occupancy_unknown_equipment() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user("alice").await;

    let response = app
        .server
        .get("/api/occupancy/999?date=2025-03-01")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
