//! Event Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Event, EventCreate, EventUpdate, EventWithRoom, Room};
use chrono::NaiveDate;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "event";

#[derive(Clone)]
pub struct EventRepository {
    base: BaseRepository,
}

impl EventRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all events with their room name, ordered by start date
    pub async fn find_all(&self) -> RepoResult<Vec<EventWithRoom>> {
        let events: Vec<EventWithRoom> = self
            .base
            .db()
            .query("SELECT *, room.name AS room_name FROM event ORDER BY start_date ASC")
            .await?
            .take(0)?;
        Ok(events)
    }

    /// Find event by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Event>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let event: Option<Event> = self.base.db().select(thing).await?;
        Ok(event)
    }

    /// Find event by id with its room name fetched
    pub async fn find_by_id_with_room(&self, id: &str) -> RepoResult<Option<EventWithRoom>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query("SELECT *, room.name AS room_name FROM event WHERE id = $id")
            .bind(("id", thing))
            .await?;
        let events: Vec<EventWithRoom> = result.take(0)?;
        Ok(events.into_iter().next())
    }

    /// Events whose start date falls inside [start, end)
    pub async fn find_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<EventWithRoom>> {
        let events: Vec<EventWithRoom> = self
            .base
            .db()
            .query(
                "SELECT *, room.name AS room_name FROM event \
                 WHERE start_date >= $start AND start_date < $end \
                 ORDER BY start_date ASC",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(events)
    }

    /// Upcoming events: start date strictly after the given day, ascending
    pub async fn find_upcoming(&self, after: NaiveDate, limit: i64) -> RepoResult<Vec<EventWithRoom>> {
        let events: Vec<EventWithRoom> = self
            .base
            .db()
            .query(
                "SELECT *, room.name AS room_name FROM event \
                 WHERE start_date > $after ORDER BY start_date ASC LIMIT $limit",
            )
            .bind(("after", after))
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(events)
    }

    /// Create a new event; the referenced room must exist
    pub async fn create(&self, data: EventCreate) -> RepoResult<Event> {
        let room: Option<Room> = self.base.db().select(data.room.clone()).await?;
        if room.is_none() {
            return Err(RepoError::NotFound(format!("Room {} not found", data.room)));
        }

        let event = Event {
            id: None,
            name: data.name,
            description: data.description,
            start_date: data.start_date,
            end_date: data.end_date,
            start_time: data.start_time,
            end_time: data.end_time,
            event_type: data.event_type,
            ticket_price: data.ticket_price.unwrap_or(0.0),
            room: Some(data.room),
        };

        let created: Option<Event> = self.base.db().create(TABLE).content(event).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create event".to_string()))
    }

    /// Update an event
    pub async fn update(&self, id: &str, data: EventUpdate) -> RepoResult<Event> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Event {} not found", id)))?;

        if let Some(room) = &data.room {
            let found: Option<Room> = self.base.db().select(room.clone()).await?;
            if found.is_none() {
                return Err(RepoError::NotFound(format!("Room {} not found", room)));
            }
        }

        let name = data.name.unwrap_or(existing.name);
        let description = data.description.or(existing.description);
        let start_date = data.start_date.unwrap_or(existing.start_date);
        let end_date = data.end_date.or(existing.end_date);
        let start_time = data.start_time.or(existing.start_time);
        let end_time = data.end_time.or(existing.end_time);
        let event_type = data.event_type.or(existing.event_type);
        let ticket_price = data.ticket_price.unwrap_or(existing.ticket_price);
        let room = data.room.or(existing.room);

        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, description = $description, \
                 start_date = $start_date, end_date = $end_date, \
                 start_time = $start_time, end_time = $end_time, \
                 event_type = $event_type, ticket_price = $ticket_price, room = $room",
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("description", description))
            .bind(("start_date", start_date))
            .bind(("end_date", end_date))
            .bind(("start_time", start_time))
            .bind(("end_time", end_time))
            .bind(("event_type", event_type))
            .bind(("ticket_price", ticket_price))
            .bind(("room", room))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Event {} not found", id)))
    }

    /// Hard delete an event
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
