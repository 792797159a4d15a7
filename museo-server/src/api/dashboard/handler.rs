//! Dashboard API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Products below this available-stock level count as low stock
const LOW_STOCK_THRESHOLD: i32 = 5;

/// Back-office metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetrics {
    /// Sum of all reservation totals
    pub total_revenue: f64,
    /// Events starting after today
    pub future_events: i64,
    /// Products with less than 5 units available
    pub low_stock: i64,
    /// Reservations ever recorded
    pub total_reservations: i64,
}

/// GET /api/dashboard - aggregated metrics for the control panel
pub async fn metrics(State(state): State<ServerState>) -> AppResult<Json<DashboardMetrics>> {
    let today = chrono::Local::now().date_naive();

    let mut result = state
        .db
        .query(
            r#"
            LET $revenue = math::sum((SELECT VALUE total FROM reservation)) OR 0;
            LET $future_events = count((SELECT VALUE id FROM event WHERE start_date > $today));
            LET $low_stock = count((SELECT VALUE id FROM inventory_product WHERE stock_available < $threshold));
            LET $total_reservations = count((SELECT VALUE id FROM reservation));

            RETURN {
                total_revenue: $revenue,
                future_events: $future_events,
                low_stock: $low_stock,
                total_reservations: $total_reservations
            }
        "#,
        )
        .bind(("today", today))
        .bind(("threshold", LOW_STOCK_THRESHOLD))
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let metrics: DashboardMetrics = result
        .take::<Option<DashboardMetrics>>(4)
        .map_err(|e| AppError::database(e.to_string()))?
        .unwrap_or(DashboardMetrics {
            total_revenue: 0.0,
            future_events: 0,
            low_stock: 0,
            total_reservations: 0,
        });

    Ok(Json(metrics))
}
