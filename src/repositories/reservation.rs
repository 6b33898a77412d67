use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use crate::entity::reservation::{
    self, ActiveModel, Column, Entity as ReservationEntity, Relation,
};
use crate::entity::{equipment, user};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateReservation, Reservation, ReservationDetail, UpdateReservation,
    RESERVATION_STATUS_ACTIVE,
};
use crate::services::interval::Interval;

/// Reservation repository: storage queries for the scheduling core
pub struct ReservationRepository;

impl ReservationRepository {
    /// Base query for reservations enriched with the owning username and
    /// equipment name (read-side join, ordered by start time).
    fn detailed() -> Select<ReservationEntity> {
        ReservationEntity::find()
            .select_only()
            .columns([
                Column::Id,
                Column::EquipmentId,
                Column::UserId,
                Column::StartTime,
                Column::EndTime,
                Column::Status,
                Column::CreatedAt,
                Column::UpdatedAt,
            ])
            .column_as(user::Column::Username, "user_username")
            .column_as(equipment::Column::Name, "equipment_name")
            .join(JoinType::InnerJoin, Relation::User.def())
            .join(JoinType::InnerJoin, Relation::Equipment.def())
            .order_by_asc(Column::StartTime)
    }

    pub async fn list_detailed(db: &DatabaseConnection) -> AppResult<Vec<ReservationDetail>> {
        let rows = Self::detailed()
            .into_model::<ReservationDetail>()
            .all(db)
            .await?;
        Ok(rows)
    }

    pub async fn find_detailed(db: &DatabaseConnection, id: i64) -> AppResult<ReservationDetail> {
        Self::detailed()
            .filter(Column::Id.eq(id))
            .into_model::<ReservationDetail>()
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Reservation".to_string()))
    }

    pub async fn list_by_equipment_detailed(
        db: &DatabaseConnection,
        equipment_id: i64,
    ) -> AppResult<Vec<ReservationDetail>> {
        let rows = Self::detailed()
            .filter(Column::EquipmentId.eq(equipment_id))
            .into_model::<ReservationDetail>()
            .all(db)
            .await?;
        Ok(rows)
    }

    pub async fn list_by_user_detailed(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> AppResult<Vec<ReservationDetail>> {
        let rows = Self::detailed()
            .filter(Column::UserId.eq(user_id))
            .into_model::<ReservationDetail>()
            .all(db)
            .await?;
        Ok(rows)
    }

    /// Plain (un-enriched) lookup, used by the lifecycle service
    pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> AppResult<Reservation> {
        let model = ReservationEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Reservation".to_string()))?;

        Ok(model.into())
    }

    /// All reservations, used by the occupancy derivation
    pub async fn list_all(db: &DatabaseConnection) -> AppResult<Vec<Reservation>> {
        let models = ReservationEntity::find()
            .order_by_asc(Column::StartTime)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// The conflict query: ids of active reservations on this equipment
    /// whose `[start, end)` interval strictly overlaps the proposed one.
    ///
    /// `start < proposed.end AND end > proposed.start` is the canonical
    /// strict-overlap predicate; touching endpoints do not match.
    pub async fn find_conflicts(
        db: &DatabaseConnection,
        equipment_id: i64,
        proposed: &Interval,
        exclude_reservation_id: Option<i64>,
    ) -> AppResult<Vec<i64>> {
        let mut query = ReservationEntity::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::EquipmentId.eq(equipment_id))
            .filter(Column::Status.eq(RESERVATION_STATUS_ACTIVE))
            .filter(Column::StartTime.lt(proposed.end))
            .filter(Column::EndTime.gt(proposed.start));

        if let Some(exclude) = exclude_reservation_id {
            query = query.filter(Column::Id.ne(exclude));
        }

        let ids = query.into_tuple::<i64>().all(db).await?;
        Ok(ids)
    }

    /// Persist a new active reservation owned by `user_id`
    pub async fn create(
        db: &DatabaseConnection,
        user_id: i64,
        input: &CreateReservation,
    ) -> AppResult<Reservation> {
        let now = time::OffsetDateTime::now_utc();
        let model = ActiveModel {
            equipment_id: Set(input.equipment_id),
            user_id: Set(user_id),
            start_time: Set(input.start_time),
            end_time: Set(input.end_time),
            status: Set(RESERVATION_STATUS_ACTIVE.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Apply the given field changes to an existing reservation
    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        input: &UpdateReservation,
    ) -> AppResult<Reservation> {
        let model = ReservationEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Reservation".to_string()))?;

        let mut active: ActiveModel = model.into();

        if let Some(start_time) = input.start_time {
            active.start_time = Set(start_time);
        }
        if let Some(end_time) = input.end_time {
            active.end_time = Set(end_time);
        }
        if let Some(status) = &input.status {
            active.status = Set(status.clone());
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }

    /// Hard delete
    pub async fn delete(db: &DatabaseConnection, id: i64) -> AppResult<()> {
        let result = ReservationEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Reservation".to_string()));
        }

        Ok(())
    }
}

// Conversion from SeaORM model to our domain model
impl From<reservation::Model> for Reservation {
    fn from(m: reservation::Model) -> Self {
        Self {
            id: m.id,
            equipment_id: m.equipment_id,
            user_id: m.user_id,
            start_time: m.start_time,
            end_time: m.end_time,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
