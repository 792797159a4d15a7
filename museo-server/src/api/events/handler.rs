//! Event API Handlers

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use surrealdb::RecordId;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Event, EventCreate, EventProduct, EventUpdate, EventWithRoom};
use crate::db::repository::EventRepository;
use crate::services::StockService;
use crate::services::excel;
use crate::utils::{AppError, AppResult};

/// Default number of events returned by the upcoming endpoint
const DEFAULT_UPCOMING_LIMIT: i64 = 6;

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub limit: Option<i64>,
}

/// GET /api/events - list all events with their room name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<EventWithRoom>>> {
    let repo = EventRepository::new(state.get_db());
    let events = repo.find_all().await?;
    Ok(Json(events))
}

/// GET /api/events/{id} - get a single event
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<EventWithRoom>> {
    let repo = EventRepository::new(state.get_db());
    let event = repo
        .find_by_id_with_room(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {} not found", id)))?;
    Ok(Json(event))
}

/// GET /api/events/current-month - events starting in the current month
pub async fn current_month(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<EventWithRoom>>> {
    let today = chrono::Local::now().date_naive();
    let month_start = today.with_day(1).unwrap_or(today);
    let next_month_start = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    }
    .unwrap_or(month_start);

    let repo = EventRepository::new(state.get_db());
    let events = repo.find_between(month_start, next_month_start).await?;
    Ok(Json(events))
}

/// GET /api/events/upcoming?limit=N - next events after today
pub async fn upcoming(
    State(state): State<ServerState>,
    Query(query): Query<UpcomingQuery>,
) -> AppResult<Json<Vec<EventWithRoom>>> {
    let limit = query.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT).max(1);
    let today = chrono::Local::now().date_naive();

    let repo = EventRepository::new(state.get_db());
    let events = repo.find_upcoming(today, limit).await?;
    Ok(Json(events))
}

/// POST /api/events - create an event
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EventCreate>,
) -> AppResult<Json<Event>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = EventRepository::new(state.get_db());
    let event = repo.create(payload).await?;
    Ok(Json(event))
}

/// PUT /api/events/{id} - update an event
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EventUpdate>,
) -> AppResult<Json<Event>> {
    let repo = EventRepository::new(state.get_db());
    let event = repo.update(&id, payload).await?;
    Ok(Json(event))
}

/// DELETE /api/events/{id} - delete an event
///
/// Inventory assigned to the event is released first so its stock is
/// restored.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = EventRepository::new(state.get_db());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {} not found", id)))?;

    let event_id = parse_event_id(&id)?;
    StockService::new(state.get_db()).release(&event_id).await?;

    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

/// GET /api/events/export/excel - download the events report
pub async fn export_excel(State(state): State<ServerState>) -> AppResult<Response> {
    let repo = EventRepository::new(state.get_db());
    let events = repo.find_all().await?;

    let bytes = excel::events_report(&events)?;
    tracing::info!(events = events.len(), "Events report exported");

    Ok(crate::api::xlsx_attachment("events_report.xlsx", bytes))
}

/// GET /api/events/{id}/inventory - list inventory assigned to the event
pub async fn list_inventory(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<EventProduct>>> {
    let event_id = parse_event_id(&id)?;
    let assignments = StockService::new(state.get_db())
        .assignments(&event_id)
        .await?;
    Ok(Json(assignments))
}

/// POST /api/events/{id}/inventory - reserve inventory for the event
///
/// The body maps product IDs to requested quantities. The whole batch
/// succeeds or fails as one transaction.
pub async fn reserve_inventory(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(requirements): Json<HashMap<String, i32>>,
) -> AppResult<Json<Vec<EventProduct>>> {
    let repo = EventRepository::new(state.get_db());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {} not found", id)))?;

    let event_id = parse_event_id(&id)?;
    let stock = StockService::new(state.get_db());
    stock.reserve(&event_id, &requirements).await?;

    let assignments = stock.assignments(&event_id).await?;
    Ok(Json(assignments))
}

/// DELETE /api/events/{id}/inventory - release the event's inventory
pub async fn release_inventory(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let event_id = parse_event_id(&id)?;
    StockService::new(state.get_db()).release(&event_id).await?;
    Ok(Json(true))
}

fn parse_event_id(id: &str) -> AppResult<RecordId> {
    id.parse()
        .map_err(|_| AppError::validation(format!("Invalid event ID: {}", id)))
}
