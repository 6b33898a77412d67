use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub id: i64,
    pub equipment_id: i64,
    pub x_position: i32,
    pub y_position: i32,
    pub width: i32,
    pub height: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Position input for the create-or-update path; width and height fall back
/// to the floor-plan defaults when omitted.
#[derive(Debug, Deserialize)]
pub struct UpsertLayout {
    pub x_position: i32,
    pub y_position: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

pub const DEFAULT_LAYOUT_WIDTH: i32 = 150;
pub const DEFAULT_LAYOUT_HEIGHT: i32 = 100;
