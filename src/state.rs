use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::sync::Mutex;

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    /// Serializes conflict-check + write so two concurrent bookings for the
    /// same window cannot both pass the check before either persists.
    pub booking_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Create a new AppState by connecting to the database and running migrations
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let mut opt = ConnectOptions::new(&config.database_url);
        if config.database_url.contains(":memory:") {
            // Each pooled connection to an in-memory SQLite database is its
            // own database; a single connection keeps tests coherent.
            opt.max_connections(1);
        } else {
            opt.max_connections(20).min_connections(1);
        }
        opt.sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(|e| AppStateError::Sqlite(e.to_string()))?;

        // Run migrations on the same pool SeaORM uses
        sqlx::migrate!("./migrations")
            .run(db.get_sqlite_connection_pool())
            .await
            .map_err(|e| AppStateError::Migration(e.to_string()))?;

        Ok(Self {
            db,
            config,
            booking_lock: Arc::new(Mutex::new(())),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("SQLite connection error: {0}")]
    Sqlite(String),

    #[error("Migration error: {0}")]
    Migration(String),
}
