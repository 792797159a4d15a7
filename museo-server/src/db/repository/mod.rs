//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB tables, one repository per
//! entity.

pub mod event;
pub mod inventory;
pub mod reservation;
pub mod room;
pub mod user;

// Re-exports
pub use event::EventRepository;
pub use inventory::InventoryRepository;
pub use reservation::ReservationRepository;
pub use room::RoomRepository;
pub use user::UserRepository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: "table:id" strings end to end
// =============================================================================
//
// All IDs are handled through surrealdb::RecordId:
//   - parse:   let id: RecordId = "room:abc".parse()?;
//   - table:   id.table()
//   - raw key: id.key().to_string()
//   - CRUD:    db.select(id) / db.delete(id) take a RecordId directly

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
