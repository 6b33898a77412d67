use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::{Layout, UpsertLayout};
use crate::repositories::{EquipmentRepository, LayoutRepository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertLayoutRequest {
    pub x_position: Option<i32>,
    pub y_position: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl UpsertLayoutRequest {
    fn into_upsert(self) -> AppResult<UpsertLayout> {
        let x_position = self
            .x_position
            .ok_or_else(|| AppError::Validation("x_position is required".to_string()))?;
        let y_position = self
            .y_position
            .ok_or_else(|| AppError::Validation("y_position is required".to_string()))?;

        Ok(UpsertLayout {
            x_position,
            y_position,
            width: self.width,
            height: self.height,
        })
    }
}

/// One entry of the bulk floor-plan save
#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkLayoutItem {
    pub equipment_id: Option<i64>,
    pub x_position: Option<i32>,
    pub y_position: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LayoutResponse {
    pub id: i64,
    pub equipment_id: i64,
    pub x_position: i32,
    pub y_position: i32,
    pub width: i32,
    pub height: i32,
}

impl From<Layout> for LayoutResponse {
    fn from(l: Layout) -> Self {
        Self {
            id: l.id,
            equipment_id: l.equipment_id,
            x_position: l.x_position,
            y_position: l.y_position,
            width: l.width,
            height: l.height,
        }
    }
}

// ============ Handlers ============

/// List all floor-plan positions
#[utoipa::path(
    get,
    path = "/api/layout",
    responses(
        (status = 200, description = "All layout entries", body = Vec<LayoutResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Layout"
)]
pub async fn list_layout(State(state): State<AppState>) -> AppResult<Json<Vec<LayoutResponse>>> {
    let layouts = LayoutRepository::list(&state.db).await?;
    Ok(Json(layouts.into_iter().map(|l| l.into()).collect()))
}

/// Get the layout entry for one equipment
#[utoipa::path(
    get,
    path = "/api/layout/equipment/{equipment_id}",
    params(
        ("equipment_id" = i64, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Layout entry", body = LayoutResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Layout not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Layout"
)]
pub async fn get_layout(
    State(state): State<AppState>,
    Path(equipment_id): Path<i64>,
) -> AppResult<Json<LayoutResponse>> {
    let layout = LayoutRepository::find_by_equipment(&state.db, equipment_id).await?;
    Ok(Json(layout.into()))
}

/// Bulk save the floor plan: upsert every entry in the array
#[utoipa::path(
    post,
    path = "/api/layout",
    request_body = Vec<BulkLayoutItem>,
    responses(
        (status = 201, description = "Layout saved", body = Vec<LayoutResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Equipment not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Layout"
)]
pub async fn save_layout(
    State(state): State<AppState>,
    Json(payload): Json<Vec<BulkLayoutItem>>,
) -> AppResult<(StatusCode, Json<Vec<LayoutResponse>>)> {
    let mut saved = Vec::with_capacity(payload.len());

    for item in payload {
        let equipment_id = item
            .equipment_id
            .ok_or_else(|| AppError::Validation("equipment_id is required".to_string()))?;

        if !EquipmentRepository::exists(&state.db, equipment_id).await? {
            return Err(AppError::NotFound("Equipment".to_string()));
        }

        let upsert = UpsertLayoutRequest {
            x_position: item.x_position,
            y_position: item.y_position,
            width: item.width,
            height: item.height,
        }
        .into_upsert()?;

        let (layout, _) = LayoutRepository::upsert(&state.db, equipment_id, &upsert).await?;
        saved.push(layout.into());
    }

    Ok((StatusCode::CREATED, Json(saved)))
}

/// Create or update the position of one equipment
#[utoipa::path(
    put,
    path = "/api/layout/equipment/{equipment_id}",
    params(
        ("equipment_id" = i64, Path, description = "Equipment ID")
    ),
    request_body = UpsertLayoutRequest,
    responses(
        (status = 200, description = "Layout updated", body = LayoutResponse),
        (status = 201, description = "Layout created", body = LayoutResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Equipment not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Layout"
)]
pub async fn upsert_layout(
    State(state): State<AppState>,
    Path(equipment_id): Path<i64>,
    Json(payload): Json<UpsertLayoutRequest>,
) -> AppResult<(StatusCode, Json<LayoutResponse>)> {
    if !EquipmentRepository::exists(&state.db, equipment_id).await? {
        return Err(AppError::NotFound("Equipment".to_string()));
    }

    let upsert = payload.into_upsert()?;
    let (layout, created) = LayoutRepository::upsert(&state.db, equipment_id, &upsert).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(layout.into())))
}

/// Remove the layout entry for one equipment
#[utoipa::path(
    delete,
    path = "/api/layout/equipment/{equipment_id}",
    params(
        ("equipment_id" = i64, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Layout deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Layout not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Layout"
)]
pub async fn delete_layout(
    State(state): State<AppState>,
    Path(equipment_id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    LayoutRepository::delete_by_equipment(&state.db, equipment_id).await?;
    Ok(Json(json!({ "message": "Layout deleted" })))
}
