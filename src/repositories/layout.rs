use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entity::layout::{self, ActiveModel, Column, Entity as LayoutEntity};
use crate::error::{AppError, AppResult};
use crate::models::{Layout, UpsertLayout, DEFAULT_LAYOUT_HEIGHT, DEFAULT_LAYOUT_WIDTH};

/// Layout repository for floor-plan positions
pub struct LayoutRepository;

impl LayoutRepository {
    pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<Layout>> {
        let models = LayoutEntity::find()
            .order_by_asc(Column::EquipmentId)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    pub async fn find_by_equipment(db: &DatabaseConnection, equipment_id: i64) -> AppResult<Layout> {
        let model = LayoutEntity::find()
            .filter(Column::EquipmentId.eq(equipment_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Layout".to_string()))?;

        Ok(model.into())
    }

    /// Create or update the position of one equipment. Returns the stored
    /// layout and whether a new row was created.
    pub async fn upsert(
        db: &DatabaseConnection,
        equipment_id: i64,
        input: &UpsertLayout,
    ) -> AppResult<(Layout, bool)> {
        let now = time::OffsetDateTime::now_utc();
        let existing = LayoutEntity::find()
            .filter(Column::EquipmentId.eq(equipment_id))
            .one(db)
            .await?;

        match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.x_position = Set(input.x_position);
                active.y_position = Set(input.y_position);
                active.width = Set(input.width.unwrap_or(DEFAULT_LAYOUT_WIDTH));
                active.height = Set(input.height.unwrap_or(DEFAULT_LAYOUT_HEIGHT));
                active.updated_at = Set(now);

                let result = active.update(db).await?;
                Ok((result.into(), false))
            }
            None => {
                let model = ActiveModel {
                    equipment_id: Set(equipment_id),
                    x_position: Set(input.x_position),
                    y_position: Set(input.y_position),
                    width: Set(input.width.unwrap_or(DEFAULT_LAYOUT_WIDTH)),
                    height: Set(input.height.unwrap_or(DEFAULT_LAYOUT_HEIGHT)),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };

                let result = model.insert(db).await?;
                Ok((result.into(), true))
            }
        }
    }

    pub async fn delete_by_equipment(db: &DatabaseConnection, equipment_id: i64) -> AppResult<()> {
        let result = LayoutEntity::delete_many()
            .filter(Column::EquipmentId.eq(equipment_id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Layout".to_string()));
        }

        Ok(())
    }
}

// Conversion from SeaORM model to our domain model
impl From<layout::Model> for Layout {
    fn from(m: layout::Model) -> Self {
        Self {
            id: m.id,
            equipment_id: m.equipment_id,
            x_position: m.x_position,
            y_position: m.y_position,
            width: m.width,
            height: m.height,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
