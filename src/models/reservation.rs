use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::services::interval::Interval;

/// Only reservations in this status participate in conflict checks.
pub const RESERVATION_STATUS_ACTIVE: &str = "active";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub equipment_id: i64,
    pub user_id: i64,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Reservation {
    pub fn interval(&self) -> Interval {
        Interval::new(self.start_time, self.end_time)
    }

    pub fn is_active(&self) -> bool {
        self.status == RESERVATION_STATUS_ACTIVE
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateReservation {
    pub equipment_id: i64,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateReservation {
    pub start_time: Option<OffsetDateTime>,
    pub end_time: Option<OffsetDateTime>,
    pub status: Option<String>,
}

impl UpdateReservation {
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none() && self.status.is_none()
    }
}

/// Reservation enriched with display fields (read-side join)
#[derive(Debug, Clone, Serialize, FromQueryResult, ToSchema)]
pub struct ReservationDetail {
    pub id: i64,
    pub equipment_id: i64,
    pub user_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub end_time: OffsetDateTime,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
    pub user_username: String,
    pub equipment_name: String,
}
