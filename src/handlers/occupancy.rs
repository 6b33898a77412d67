use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};
use crate::repositories::{EquipmentRepository, Repository, ReservationRepository, UserRepository};
use crate::services::occupancy;
use crate::state::AppState;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, IntoParams)]
pub struct OccupancyParams {
    /// Calendar date, YYYY-MM-DD
    pub date: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OccupancySlot {
    pub time: String,
    pub reserved: bool,
    pub user_id: Option<i64>,
    pub username: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OccupancyResponse {
    pub equipment_id: i64,
    pub date: String,
    pub slots: Vec<OccupancySlot>,
}

// ============ Handlers ============

/// Half-hour occupancy grid for one equipment on one date
#[utoipa::path(
    get,
    path = "/api/occupancy/{equipment_id}",
    params(
        ("equipment_id" = i64, Path, description = "Equipment ID"),
        OccupancyParams
    ),
    responses(
        (status = 200, description = "48-slot occupancy grid", body = OccupancyResponse),
        (status = 400, description = "Missing or malformed date"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Equipment not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Occupancy"
)]
pub async fn get_occupancy(
    State(state): State<AppState>,
    Path(equipment_id): Path<i64>,
    Query(params): Query<OccupancyParams>,
) -> AppResult<Json<OccupancyResponse>> {
    let date_raw = params
        .date
        .ok_or_else(|| AppError::Validation("date query parameter is required".to_string()))?;
    let date = Date::parse(&date_raw, DATE_FORMAT)
        .map_err(|_| AppError::Validation("date must be YYYY-MM-DD".to_string()))?;

    if !EquipmentRepository::exists(&state.db, equipment_id).await? {
        return Err(AppError::NotFound("Equipment".to_string()));
    }

    let reservations = ReservationRepository::list_all(&state.db).await?;
    let usernames: HashMap<i64, String> = UserRepository::list(&state.db)
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();

    let slots = occupancy::slot_occupancy(equipment_id, date, &reservations)
        .into_iter()
        .map(|slot| OccupancySlot {
            time: slot.label,
            reserved: slot.reserved,
            username: slot.user_id.and_then(|id| usernames.get(&id).cloned()),
            user_id: slot.user_id,
        })
        .collect();

    Ok(Json(OccupancyResponse {
        equipment_id,
        date: date_raw,
        slots,
    }))
}
