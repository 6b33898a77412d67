use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::middlewares::AuthUser;
use crate::models::{CreateReservation, ReservationDetail, UpdateReservation};
use crate::repositories::ReservationRepository;
use crate::services::interval::parse_instant;
use crate::services::ReservationService;
use crate::state::AppState;

// ============ Request/Response DTOs ============

// Time fields arrive as strings so that missing and malformed values both
// surface as 400, not as a body-rejection status.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    pub equipment_id: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReservationRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
}

// ============ Handlers ============

/// List all reservations, enriched with usernames and equipment names
#[utoipa::path(
    get,
    path = "/api/reservations",
    responses(
        (status = 200, description = "List of reservations", body = Vec<ReservationDetail>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reservations"
)]
pub async fn list_reservations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReservationDetail>>> {
    let reservations = ReservationRepository::list_detailed(&state.db).await?;
    Ok(Json(reservations))
}

/// Get a reservation by ID
#[utoipa::path(
    get,
    path = "/api/reservations/{id}",
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation details", body = ReservationDetail),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Reservation not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reservations"
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReservationDetail>> {
    let reservation = ReservationRepository::find_detailed(&state.db, id).await?;
    Ok(Json(reservation))
}

/// List reservations for one equipment
#[utoipa::path(
    get,
    path = "/api/reservations/equipment/{equipment_id}",
    params(
        ("equipment_id" = i64, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Reservations for the equipment", body = Vec<ReservationDetail>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reservations"
)]
pub async fn list_reservations_by_equipment(
    State(state): State<AppState>,
    Path(equipment_id): Path<i64>,
) -> AppResult<Json<Vec<ReservationDetail>>> {
    let reservations =
        ReservationRepository::list_by_equipment_detailed(&state.db, equipment_id).await?;
    Ok(Json(reservations))
}

/// List reservations made by one user
#[utoipa::path(
    get,
    path = "/api/reservations/user/{user_id}",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Reservations made by the user", body = Vec<ReservationDetail>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reservations"
)]
pub async fn list_reservations_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<ReservationDetail>>> {
    let reservations = ReservationRepository::list_by_user_detailed(&state.db, user_id).await?;
    Ok(Json(reservations))
}

/// Book a time interval on an equipment
#[utoipa::path(
    post,
    path = "/api/reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ReservationDetail),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Time conflict with an existing reservation")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reservations"
)]
pub async fn create_reservation(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationDetail>)> {
    let equipment_id = payload
        .equipment_id
        .ok_or_else(|| AppError::Validation("equipment_id is required".to_string()))?;
    let start_raw = payload
        .start_time
        .ok_or_else(|| AppError::Validation("start_time is required".to_string()))?;
    let end_raw = payload
        .end_time
        .ok_or_else(|| AppError::Validation("end_time is required".to_string()))?;

    let input = CreateReservation {
        equipment_id,
        start_time: parse_instant("start_time", &start_raw)?,
        end_time: parse_instant("end_time", &end_raw)?,
    };

    let reservation = ReservationService::create(&state, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Update a reservation's times or status (owner only)
#[utoipa::path(
    put,
    path = "/api/reservations/{id}",
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Reservation updated", body = ReservationDetail),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Time conflict with an existing reservation")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reservations"
)]
pub async fn update_reservation(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateReservationRequest>,
) -> AppResult<Json<ReservationDetail>> {
    let input = UpdateReservation {
        start_time: payload
            .start_time
            .map(|s| parse_instant("start_time", &s))
            .transpose()?,
        end_time: payload
            .end_time
            .map(|s| parse_instant("end_time", &s))
            .transpose()?,
        status: payload.status,
    };

    let reservation = ReservationService::update(&state, id, user.id, input).await?;
    Ok(Json(reservation))
}

/// Cancel a reservation (owner only, hard delete)
#[utoipa::path(
    delete,
    path = "/api/reservations/{id}",
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Reservation not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reservations"
)]
pub async fn delete_reservation(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    ReservationService::delete(&state, id, user.id).await?;
    Ok(Json(json!({ "message": "Reservation deleted" })))
}
