use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entity::user::{self, ActiveModel, Column, Entity as UserEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repositories::Repository;

/// User repository for database operations
pub struct UserRepository;

#[async_trait]
impl Repository<User> for UserRepository {
    async fn find_by_id(db: &DatabaseConnection, id: i64) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(model.into())
    }

    async fn list(db: &DatabaseConnection) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(Column::Username)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn delete(db: &DatabaseConnection, id: i64) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(())
    }
}

impl UserRepository {
    /// Create a new user
    pub async fn create(
        db: &DatabaseConnection,
        input: &CreateUser,
        password_hash: &str,
    ) -> AppResult<User> {
        let now = time::OffsetDateTime::now_utc();
        let model = ActiveModel {
            username: Set(input.username.clone()),
            password_hash: Set(password_hash.to_string()),
            name: Set(input.name.clone()),
            email: Set(input.email.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("unique") {
                AppError::Conflict("Username already exists".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        Ok(result.into())
    }

    /// Find a user by username
    pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> AppResult<Option<User>> {
        let model = UserEntity::find()
            .filter(Column::Username.eq(username))
            .one(db)
            .await?;

        Ok(model.map(|m| m.into()))
    }

    /// Update a user's profile fields
    pub async fn update(db: &DatabaseConnection, id: i64, input: &UpdateUser) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = &input.name {
            active.name = Set(Some(name.clone()));
        }
        if let Some(email) = &input.email {
            active.email = Set(Some(email.clone()));
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }
}

// Conversion from SeaORM model to our domain model
impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            password_hash: m.password_hash,
            name: m.name,
            email: m.email,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
