//! Room Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Room, RoomCreate, RoomUpdate};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "room";

#[derive(Clone)]
pub struct RoomRepository {
    base: BaseRepository,
}

impl RoomRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all rooms ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Room>> {
        let rooms: Vec<Room> = self
            .base
            .db()
            .query("SELECT * FROM room ORDER BY name")
            .await?
            .take(0)?;
        Ok(rooms)
    }

    /// Find room by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Room>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let room: Option<Room> = self.base.db().select(thing).await?;
        Ok(room)
    }

    /// Create a new room
    pub async fn create(&self, data: RoomCreate) -> RepoResult<Room> {
        let room = Room {
            id: None,
            name: data.name,
            capacity: data.capacity.unwrap_or(0),
            location: data.location,
            description: data.description,
            image_url: data.image_url,
        };

        let created: Option<Room> = self.base.db().create(TABLE).content(room).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create room".to_string()))
    }

    /// Update a room
    pub async fn update(&self, id: &str, data: RoomUpdate) -> RepoResult<Room> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))?;

        let name = data.name.unwrap_or(existing.name);
        let capacity = data.capacity.unwrap_or(existing.capacity);
        let location = data.location.or(existing.location);
        let description = data.description.or(existing.description);
        let image_url = data.image_url.or(existing.image_url);

        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, capacity = $capacity, location = $location, \
                 description = $description, image_url = $image_url",
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("capacity", capacity))
            .bind(("location", location))
            .bind(("description", description))
            .bind(("image_url", image_url))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))
    }

    /// Hard delete a room
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
