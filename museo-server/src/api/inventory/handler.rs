//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{InventoryProduct, InventoryProductCreate, InventoryProductUpdate};
use crate::db::repository::InventoryRepository;
use crate::services::excel;
use crate::utils::{AppError, AppResult};

/// GET /api/inventory - list all products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<InventoryProduct>>> {
    let repo = InventoryRepository::new(state.get_db());
    let products = repo.find_all().await?;
    Ok(Json(products))
}

/// GET /api/inventory/available - products with stock available
pub async fn list_available(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<InventoryProduct>>> {
    let repo = InventoryRepository::new(state.get_db());
    let products = repo.find_available().await?;
    Ok(Json(products))
}

/// GET /api/inventory/{id} - get a single product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<InventoryProduct>> {
    let repo = InventoryRepository::new(state.get_db());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Inventory product {} not found", id)))?;
    Ok(Json(product))
}

/// POST /api/inventory - create a product
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InventoryProductCreate>,
) -> AppResult<Json<InventoryProduct>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = InventoryRepository::new(state.get_db());
    let product = repo.create(payload).await?;
    Ok(Json(product))
}

/// PUT /api/inventory/{id} - update a product
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<InventoryProductUpdate>,
) -> AppResult<Json<InventoryProduct>> {
    let repo = InventoryRepository::new(state.get_db());
    let product = repo.update(&id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/inventory/{id} - delete a product
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = InventoryRepository::new(state.get_db());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Inventory product {} not found", id)))?;

    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

/// GET /api/inventory/export/excel - download the inventory report
pub async fn export_excel(State(state): State<ServerState>) -> AppResult<Response> {
    let repo = InventoryRepository::new(state.get_db());
    let products = repo.find_all().await?;

    let bytes = excel::inventory_report(&products)?;
    tracing::info!(products = products.len(), "Inventory report exported");

    Ok(crate::api::xlsx_attachment("inventory_report.xlsx", bytes))
}
