use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::entity::equipment::{self, ActiveModel, Column, Entity as EquipmentEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateEquipment, Equipment, UpdateEquipment};
use crate::repositories::Repository;

/// Equipment repository for database operations
pub struct EquipmentRepository;

#[async_trait]
impl Repository<Equipment> for EquipmentRepository {
    async fn find_by_id(db: &DatabaseConnection, id: i64) -> AppResult<Equipment> {
        let model = EquipmentEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Equipment".to_string()))?;

        Ok(model.into())
    }

    async fn list(db: &DatabaseConnection) -> AppResult<Vec<Equipment>> {
        let models = EquipmentEntity::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn delete(db: &DatabaseConnection, id: i64) -> AppResult<()> {
        let result = EquipmentEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Equipment".to_string()));
        }

        Ok(())
    }
}

impl EquipmentRepository {
    /// Create a new equipment
    pub async fn create(db: &DatabaseConnection, input: &CreateEquipment) -> AppResult<Equipment> {
        let now = time::OffsetDateTime::now_utc();
        let model = ActiveModel {
            name: Set(input.name.clone()),
            equipment_type: Set(input.equipment_type.clone()),
            description: Set(input.description.clone()),
            active: Set(input.active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Whether an equipment with this id exists
    pub async fn exists(db: &DatabaseConnection, id: i64) -> AppResult<bool> {
        let count = EquipmentEntity::find_by_id(id).count(db).await?;
        Ok(count > 0)
    }

    /// Update equipment fields
    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        input: &UpdateEquipment,
    ) -> AppResult<Equipment> {
        let model = EquipmentEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Equipment".to_string()))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = &input.name {
            active.name = Set(name.clone());
        }
        if let Some(equipment_type) = &input.equipment_type {
            active.equipment_type = Set(equipment_type.clone());
        }
        if let Some(description) = &input.description {
            active.description = Set(description.clone());
        }
        if let Some(is_active) = input.active {
            active.active = Set(is_active);
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }
}

// Conversion from SeaORM model to our domain model
impl From<equipment::Model> for Equipment {
    fn from(m: equipment::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            equipment_type: m.equipment_type,
            description: m.description,
            active: m.active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
