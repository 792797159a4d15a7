//! Inventory Models
//!
//! Countable assets (chairs, projectors) whose available stock is drawn
//! down when assigned to an event and restored on release.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Inventory product ID type
pub type InventoryProductId = RecordId;

/// Inventory product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryProduct {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<InventoryProductId>,
    pub name: String,
    pub category: Option<String>,
    #[serde(default)]
    pub stock_total: i32,
    /// Invariant: 0 <= stock_available <= stock_total
    #[serde(default)]
    pub stock_available: i32,
}

/// Create inventory product payload
///
/// When `stock_available` is omitted it defaults to `stock_total`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InventoryProductCreate {
    #[validate(length(min = 1, message = "Product name must not be empty"))]
    pub name: String,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Total stock must not be negative"))]
    pub stock_total: i32,
    #[validate(range(min = 0, message = "Available stock must not be negative"))]
    pub stock_available: Option<i32>,
}

/// Update inventory product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_total: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_available: Option<i32>,
}

/// Join row: stock held by an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventProduct {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub event: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub quantity_assigned: i32,
}
