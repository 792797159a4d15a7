//! Room Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Room ID type
pub type RoomId = RecordId;

/// Exhibition room entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RoomId>,
    pub name: String,
    #[serde(default)]
    pub capacity: i32,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Serving path of the uploaded room image (`/api/image/{file}`)
    pub image_url: Option<String>,
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoomCreate {
    #[validate(length(min = 1, message = "Room name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "Capacity must not be negative"))]
    pub capacity: Option<i32>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Update room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
