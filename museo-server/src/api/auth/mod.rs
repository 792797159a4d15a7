//! Auth API module

pub mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub use handler::UserInfo;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Public routes (skipped by require_auth)
        .route("/login", post(handler::login))
        .route("/register", post(handler::register))
        // Authenticated routes
        .route("/me", get(handler::me))
        .route("/logout", post(handler::logout))
}
