//! Reservation Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Reservation;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "reservation";

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all reservations, most recent first
    pub async fn find_all(&self) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation ORDER BY reserved_at DESC")
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Find reservation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let reservation: Option<Reservation> = self.base.db().select(thing).await?;
        Ok(reservation)
    }

    /// Persist a reservation with its precomputed total
    pub async fn create(&self, reservation: Reservation) -> RepoResult<Reservation> {
        let created: Option<Reservation> =
            self.base.db().create(TABLE).content(reservation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }
}
