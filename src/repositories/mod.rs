pub mod equipment;
pub mod layout;
pub mod reservation;
pub mod user;

pub use equipment::EquipmentRepository;
pub use layout::LayoutRepository;
pub use reservation::ReservationRepository;
pub use user::UserRepository;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::error::AppResult;

/// Base repository trait for common CRUD operations
#[async_trait]
pub trait Repository<T>
where
    T: Send + Sync,
{
    /// Find entity by ID
    async fn find_by_id(db: &DatabaseConnection, id: i64) -> AppResult<T>;

    /// List all entities
    async fn list(db: &DatabaseConnection) -> AppResult<Vec<T>>;

    /// Delete entity by ID
    async fn delete(db: &DatabaseConnection, id: i64) -> AppResult<()>;
}
