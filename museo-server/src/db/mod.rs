//! Database Module
//!
//! Owns the embedded SurrealDB instance: connection, schema definition and
//! initial data seeding.

pub mod models;
pub mod repository;

use crate::db::models::User;
use crate::db::repository::UserRepository;
use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Table and index definitions, applied on every startup (idempotent)
const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS room SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS event SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS reservation SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS inventory_product SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS event_product SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS user_username_idx ON TABLE user COLUMNS username UNIQUE;
    DEFINE INDEX IF NOT EXISTS event_product_event_idx ON TABLE event_product COLUMNS event;
";

/// Default administrator credentials, created on first startup
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database, apply the schema and seed
    /// the default admin account.
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

        db.use_ns("museo")
            .use_db("museo")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {}", e)))?
            .check()
            .map_err(|e| AppError::database(format!("Schema statement failed: {}", e)))?;

        tracing::info!("Database ready (embedded SurrealDB at {})", db_path);

        seed_admin(&db).await?;

        Ok(Self { db })
    }
}

/// Create the default admin user if it does not exist yet
async fn seed_admin(db: &Surreal<Db>) -> Result<(), AppError> {
    let repo = UserRepository::new(db.clone());

    let existing = repo
        .find_by_username(DEFAULT_ADMIN_USERNAME)
        .await
        .map_err(AppError::from)?;
    if existing.is_some() {
        return Ok(());
    }

    let hash_pass = User::hash_password(DEFAULT_ADMIN_PASSWORD)
        .map_err(|e| AppError::internal(format!("Failed to hash admin password: {}", e)))?;

    let admin = User {
        id: None,
        full_name: "Main Administrator".to_string(),
        username: DEFAULT_ADMIN_USERNAME.to_string(),
        hash_pass,
        role: "admin".to_string(),
        is_active: true,
        created_at: chrono::Utc::now().timestamp_millis(),
    };

    repo.create(admin).await.map_err(AppError::from)?;
    tracing::info!(
        username = DEFAULT_ADMIN_USERNAME,
        "Default admin user created"
    );

    Ok(())
}
