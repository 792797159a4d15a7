use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;

/// Shared server state
///
/// Holds the handles every request needs. `Clone` is cheap: the database
/// handle and JWT service are shared references.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT authentication service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Manual constructor; [`ServerState::initialize`] is the usual entry point
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// Initialize the server state
    ///
    /// 1. Ensure the working directory layout exists
    /// 2. Open the database (`work_dir/database/museo.db`), apply schema, seed admin
    /// 3. Build the JWT service
    pub async fn initialize(config: &Config) -> Result<Self, crate::utils::AppError> {
        config.ensure_work_dir_structure().map_err(|e| {
            crate::utils::AppError::internal(format!(
                "Failed to create work directory structure: {}",
                e
            ))
        })?;

        let db_path = config.database_dir().join("museo.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(config.clone(), db_service.db, jwt_service))
    }

    /// Database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Working directory
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// Directory holding uploaded images
    pub fn uploads_dir(&self) -> PathBuf {
        self.config.uploads_dir()
    }

    /// JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
