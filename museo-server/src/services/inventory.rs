//! Stock assignment service
//!
//! Reserves inventory for an event (decrementing available stock) and
//! releases it again. Each batch runs as a single database transaction:
//! a failed stock check throws inside the transaction and rolls back
//! every statement of the batch.

use std::collections::HashMap;

use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use crate::db::models::EventProduct;
use crate::utils::{AppError, AppResult};

/// One line of a reserve request, bound into the transaction script
#[derive(Debug, Clone, Serialize)]
struct StockRequirement {
    product: RecordId,
    quantity: i32,
}

const RESERVE_QUERY: &str = "\
BEGIN TRANSACTION;
FOR $req IN $items {
    LET $p = (SELECT * FROM $req.product)[0];
    IF $p == NONE { THROW 'product not found: ' + <string>$req.product };
    IF $p.stock_available < $req.quantity { THROW 'insufficient stock for: ' + $p.name };
    UPDATE $p.id SET stock_available -= $req.quantity;
    CREATE event_product CONTENT { event: $event, product: $p.id, quantity_assigned: $req.quantity };
};
COMMIT TRANSACTION;";

const RELEASE_QUERY: &str = "\
BEGIN TRANSACTION;
FOR $a IN (SELECT * FROM event_product WHERE event = $event) {
    UPDATE $a.product SET stock_available += $a.quantity_assigned;
};
DELETE event_product WHERE event = $event;
COMMIT TRANSACTION;";

#[derive(Clone)]
pub struct StockService {
    db: Surreal<Db>,
}

impl StockService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// Reserve products for an event
    ///
    /// `requirements` maps product IDs to requested quantities. Zero and
    /// negative quantities are skipped. Every remaining line is checked
    /// against the available stock; any shortfall aborts the whole batch.
    pub async fn reserve(
        &self,
        event: &RecordId,
        requirements: &HashMap<String, i32>,
    ) -> AppResult<()> {
        let mut items = Vec::with_capacity(requirements.len());
        for (product_id, quantity) in requirements {
            if *quantity <= 0 {
                continue;
            }
            let product: RecordId = product_id
                .parse()
                .map_err(|_| AppError::validation(format!("Invalid product ID: {}", product_id)))?;
            items.push(StockRequirement {
                product,
                quantity: *quantity,
            });
        }

        if items.is_empty() {
            return Ok(());
        }

        let count = items.len();
        self.db
            .query(RESERVE_QUERY)
            .bind(("event", event.clone()))
            .bind(("items", items))
            .await
            .map_err(map_stock_error)?
            .check()
            .map_err(map_stock_error)?;

        tracing::info!(event = %event, products = count, "Inventory reserved for event");
        Ok(())
    }

    /// Release every product assigned to an event, restoring its stock
    pub async fn release(&self, event: &RecordId) -> AppResult<()> {
        self.db
            .query(RELEASE_QUERY)
            .bind(("event", event.clone()))
            .await
            .map_err(map_stock_error)?
            .check()
            .map_err(map_stock_error)?;

        tracing::info!(event = %event, "Inventory released for event");
        Ok(())
    }

    /// Current assignments of an event
    pub async fn assignments(&self, event: &RecordId) -> AppResult<Vec<EventProduct>> {
        let assignments: Vec<EventProduct> = self
            .db
            .query("SELECT * FROM event_product WHERE event = $event")
            .bind(("event", event.clone()))
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .take(0)
            .map_err(|e| AppError::database(e.to_string()))?;
        Ok(assignments)
    }
}

/// Map database errors from the stock scripts onto the error taxonomy.
/// Messages thrown inside the transaction come back embedded in the
/// database error string.
fn map_stock_error(e: surrealdb::Error) -> AppError {
    let msg = e.to_string();
    let cleaned = msg
        .strip_prefix("An error occurred: ")
        .unwrap_or(&msg)
        .to_string();
    if cleaned.contains("insufficient stock") {
        AppError::business_rule(cleaned)
    } else if cleaned.contains("product not found") {
        AppError::not_found(cleaned)
    } else {
        AppError::database(cleaned)
    }
}
