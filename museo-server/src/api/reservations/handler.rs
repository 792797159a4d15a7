//! Reservation API Handlers
//!
//! Creation computes the total server-side from the event's ticket price;
//! the PDF endpoint renders the admission ticket for download.

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Reservation, ReservationCreate};
use crate::db::repository::{EventRepository, ReservationRepository};
use crate::services::{pdf, reservation::compute_total};
use crate::utils::{AppError, AppResult};

/// GET /api/reservations - list reservations, most recent first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Reservation>>> {
    let repo = ReservationRepository::new(state.get_db());
    let reservations = repo.find_all().await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/{id} - get a single reservation
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let repo = ReservationRepository::new(state.get_db());
    let reservation = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;
    Ok(Json(reservation))
}

/// POST /api/reservations - create a reservation
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let event_repo = EventRepository::new(state.get_db());
    let event = event_repo
        .find_by_id(&payload.event.to_string())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {} not found", payload.event)))?;

    let total = compute_total(event.ticket_price, payload.ticket_count)?;

    let reservation = Reservation {
        id: None,
        customer_name: payload.customer_name,
        id_document: payload.id_document,
        phone: payload.phone,
        ticket_count: payload.ticket_count,
        total,
        payment_method: payload.payment_method,
        receipt_type: payload.receipt_type,
        event: payload.event,
        reserved_at: chrono::Utc::now().timestamp_millis(),
    };

    let repo = ReservationRepository::new(state.get_db());
    let created = repo.create(reservation).await?;

    tracing::info!(
        reservation_id = %created.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
        event = %created.event,
        customer = %created.customer_name,
        total = %created.total,
        "Reservation created"
    );

    Ok(Json(created))
}

/// GET /api/reservations/{id}/ticket/pdf - download the admission ticket
pub async fn ticket_pdf(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let repo = ReservationRepository::new(state.get_db());
    let reservation = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

    let event_repo = EventRepository::new(state.get_db());
    let event = event_repo
        .find_by_id_with_room(&reservation.event.to_string())
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Event {} not found", reservation.event))
        })?;

    let bytes = pdf::ticket_pdf(&reservation, &event, &state.config.museum_name)?;

    let code = reservation
        .id
        .as_ref()
        .map(|i| i.key().to_string())
        .unwrap_or_default();
    let filename = format!("ticket_museo_{}.pdf", code);

    Ok(crate::api::pdf_attachment(&filename, bytes))
}
