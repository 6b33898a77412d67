use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::{CreateEquipment, Equipment, Reservation, UpdateEquipment};
use crate::repositories::{EquipmentRepository, Repository, ReservationRepository};
use crate::services::occupancy;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEquipmentRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub equipment_type: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEquipmentRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub equipment_type: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

/// Equipment enriched with live occupancy, for the floor plan.
#[derive(Debug, Serialize, ToSchema)]
pub struct EquipmentResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: Option<String>,
    pub description: Option<String>,
    pub active: bool,
    pub in_use: bool,
    pub current_user: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}

impl EquipmentResponse {
    /// Derive the in-use badge from the active reservation covering `now`.
    fn enrich(equipment: Equipment, now: OffsetDateTime, reservations: &[Reservation]) -> Self {
        let current_user = occupancy::current_user(equipment.id, now, reservations);
        Self {
            id: equipment.id,
            name: equipment.name,
            equipment_type: equipment.equipment_type,
            description: equipment.description,
            active: equipment.active,
            in_use: current_user.is_some(),
            current_user,
            created_at: equipment.created_at,
            updated_at: equipment.updated_at,
        }
    }
}

// ============ Handlers ============

/// List all equipment with live occupancy
#[utoipa::path(
    get,
    path = "/api/equipment",
    responses(
        (status = 200, description = "List of equipment", body = Vec<EquipmentResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Equipment"
)]
pub async fn list_equipment(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EquipmentResponse>>> {
    let equipment = EquipmentRepository::list(&state.db).await?;
    let reservations = ReservationRepository::list_all(&state.db).await?;
    let now = OffsetDateTime::now_utc();

    Ok(Json(
        equipment
            .into_iter()
            .map(|e| EquipmentResponse::enrich(e, now, &reservations))
            .collect(),
    ))
}

/// Get one equipment by ID
#[utoipa::path(
    get,
    path = "/api/equipment/{id}",
    params(
        ("id" = i64, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Equipment details", body = EquipmentResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Equipment not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Equipment"
)]
pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EquipmentResponse>> {
    let equipment = EquipmentRepository::find_by_id(&state.db, id).await?;
    let reservations = ReservationRepository::list_all(&state.db).await?;
    let now = OffsetDateTime::now_utc();

    Ok(Json(EquipmentResponse::enrich(equipment, now, &reservations)))
}

/// Create a new equipment
#[utoipa::path(
    post,
    path = "/api/equipment",
    request_body = CreateEquipmentRequest,
    responses(
        (status = 201, description = "Equipment created successfully", body = EquipmentResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Equipment"
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    Json(payload): Json<CreateEquipmentRequest>,
) -> AppResult<(StatusCode, Json<EquipmentResponse>)> {
    let name = payload
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("Name is required".to_string()))?;

    let create_equipment = CreateEquipment {
        name,
        equipment_type: payload.equipment_type,
        description: payload.description,
        active: payload.active.unwrap_or(true),
    };

    let equipment = EquipmentRepository::create(&state.db, &create_equipment).await?;
    let now = OffsetDateTime::now_utc();

    Ok((
        StatusCode::CREATED,
        Json(EquipmentResponse::enrich(equipment, now, &[])),
    ))
}

/// Update equipment fields
#[utoipa::path(
    put,
    path = "/api/equipment/{id}",
    params(
        ("id" = i64, Path, description = "Equipment ID")
    ),
    request_body = UpdateEquipmentRequest,
    responses(
        (status = 200, description = "Equipment updated successfully", body = EquipmentResponse),
        (status = 400, description = "No fields to update"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Equipment not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Equipment"
)]
pub async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEquipmentRequest>,
) -> AppResult<Json<EquipmentResponse>> {
    let update_equipment = UpdateEquipment {
        name: payload.name,
        equipment_type: payload.equipment_type.map(Some),
        description: payload.description.map(Some),
        active: payload.active,
    };

    if update_equipment.is_empty() {
        return Err(AppError::Validation("No fields to update".to_string()));
    }

    let equipment = EquipmentRepository::update(&state.db, id, &update_equipment).await?;
    let reservations = ReservationRepository::list_all(&state.db).await?;
    let now = OffsetDateTime::now_utc();

    Ok(Json(EquipmentResponse::enrich(equipment, now, &reservations)))
}

/// Delete an equipment (reservations and layout cascade)
#[utoipa::path(
    delete,
    path = "/api/equipment/{id}",
    params(
        ("id" = i64, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Equipment deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Equipment not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Equipment"
)]
pub async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    EquipmentRepository::delete(&state.db, id).await?;
    Ok(Json(json!({ "message": "Equipment deleted" })))
}
