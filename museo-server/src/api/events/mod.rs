//! Event API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/events", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/current-month", get(handler::current_month))
        .route("/upcoming", get(handler::upcoming))
        .route("/export/excel", get(handler::export_excel))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/{id}/inventory",
            get(handler::list_inventory)
                .post(handler::reserve_inventory)
                .delete(handler::release_inventory),
        )
}
