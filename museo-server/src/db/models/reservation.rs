//! Reservation Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Reservation ID type
pub type ReservationId = RecordId;

/// Ticket reservation tied to an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<ReservationId>,
    pub customer_name: String,
    /// National ID or tax number of the holder
    pub id_document: String,
    pub phone: Option<String>,
    pub ticket_count: i32,
    /// Computed total: ticket_price × ticket_count, 2 decimal places
    pub total: f64,
    pub payment_method: Option<String>,
    pub receipt_type: Option<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub event: RecordId,
    /// Unix timestamp in milliseconds
    pub reserved_at: i64,
}

/// Create reservation payload; the total is computed server-side
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReservationCreate {
    #[validate(length(min = 1, message = "Customer name must not be empty"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "ID document must not be empty"))]
    pub id_document: String,
    pub phone: Option<String>,
    #[validate(range(min = 1, message = "Ticket count must be at least 1"))]
    pub ticket_count: i32,
    pub payment_method: Option<String>,
    pub receipt_type: Option<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub event: RecordId,
}
