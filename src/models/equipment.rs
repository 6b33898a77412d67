use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    pub equipment_type: Option<String>,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateEquipment {
    pub name: String,
    pub equipment_type: Option<String>,
    pub description: Option<String>,
    pub active: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub equipment_type: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub active: Option<bool>,
}

impl UpdateEquipment {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.equipment_type.is_none()
            && self.description.is_none()
            && self.active.is_none()
    }
}
