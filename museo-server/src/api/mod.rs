//! API route modules
//!
//! - [`health`] - liveness probe
//! - [`auth`] - login, registration, current user
//! - [`users`] - user administration (admin only)
//! - [`rooms`] - exhibition room management
//! - [`events`] - event management and inventory assignment
//! - [`reservations`] - ticket reservations and PDF tickets
//! - [`inventory`] - inventory product management
//! - [`dashboard`] - back-office metrics
//! - [`upload`] - room image upload and serving

pub mod auth;
pub mod dashboard;
pub mod events;
pub mod health;
pub mod inventory;
pub mod reservations;
pub mod rooms;
pub mod upload;
pub mod users;

use axum::{Router, middleware, response::IntoResponse};
use http::header;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Wrap workbook bytes as a downloadable attachment
pub(crate) fn xlsx_attachment(filename: &str, bytes: Vec<u8>) -> axum::response::Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Wrap PDF bytes as a downloadable attachment
pub(crate) fn pdf_attachment(filename: &str, bytes: Vec<u8>) -> axum::response::Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// HTTP request logging middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        // Core APIs
        .merge(auth::router())
        .merge(health::router())
        .merge(users::router())
        .merge(upload::router())
        // Data model APIs
        .merge(rooms::router())
        .merge(events::router())
        .merge(reservations::router())
        .merge(inventory::router())
        .merge(dashboard::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // JWT auth middleware - applied router-wide; require_auth skips public routes
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        // Tower HTTP middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        // HTTP access log middleware
        .layer(middleware::from_fn(log_request))
}
