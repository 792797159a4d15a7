//! Event Model

use super::serde_helpers;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Event ID type
pub type EventId = RecordId;

/// Scheduled museum event, hosted in a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<EventId>,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub event_type: Option<String>,
    /// Ticket price per admission, 2 decimal places
    #[serde(default)]
    pub ticket_price: f64,
    /// Room hosting the event; may dangle after the room is deleted
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub room: Option<RecordId>,
}

/// Event joined with the name of its room (for listings and exports)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventWithRoom {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<EventId>,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub event_type: Option<String>,
    #[serde(default)]
    pub ticket_price: f64,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub room: Option<RecordId>,
    pub room_name: Option<String>,
}

/// Create event payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventCreate {
    #[validate(length(min = 1, message = "Event name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub event_type: Option<String>,
    #[validate(range(min = 0.0, message = "Ticket price must not be negative"))]
    pub ticket_price: Option<f64>,
    #[serde(with = "serde_helpers::record_id")]
    pub room: RecordId,
}

/// Update event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub room: Option<RecordId>,
}
