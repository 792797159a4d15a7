//! Room API Handlers

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Room, RoomCreate, RoomUpdate};
use crate::db::repository::RoomRepository;
use crate::services::excel;
use crate::utils::{AppError, AppResult};

/// GET /api/rooms - list all rooms
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Room>>> {
    let repo = RoomRepository::new(state.get_db());
    let rooms = repo.find_all().await?;
    Ok(Json(rooms))
}

/// GET /api/rooms/{id} - get a single room
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Room>> {
    let repo = RoomRepository::new(state.get_db());
    let room = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room {} not found", id)))?;
    Ok(Json(room))
}

/// POST /api/rooms - create a room
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<Json<Room>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = RoomRepository::new(state.get_db());
    let room = repo.create(payload).await?;
    Ok(Json(room))
}

/// PUT /api/rooms/{id} - update a room
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<Room>> {
    let repo = RoomRepository::new(state.get_db());
    let room = repo.update(&id, payload).await?;
    Ok(Json(room))
}

/// DELETE /api/rooms/{id} - delete a room and its uploaded image
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = RoomRepository::new(state.get_db());
    let room = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room {} not found", id)))?;

    // Remove the image file, best effort; a missing file is not an error
    if let Some(image_url) = &room.image_url
        && let Some(filename) = image_url.rsplit('/').next()
        && !filename.is_empty()
    {
        let path = state.uploads_dir().join(filename);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::debug!(path = %path.display(), error = %e, "Room image not removed");
        }
    }

    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

/// GET /api/rooms/export/excel - download the rooms report
pub async fn export_excel(State(state): State<ServerState>) -> AppResult<Response> {
    let repo = RoomRepository::new(state.get_db());
    let rooms = repo.find_all().await?;

    let bytes = excel::rooms_report(&rooms)?;
    tracing::info!(rooms = rooms.len(), "Rooms report exported");

    Ok(crate::api::xlsx_attachment("rooms_report.xlsx", bytes))
}
