//! Authentication Middleware
//!
//! Axum middleware for JWT authentication and role checks.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Authentication middleware - requires a logged-in user
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`.
/// On success the [`CurrentUser`] is injected into the request extensions.
///
/// Skipped for:
/// - `OPTIONS *` (CORS preflight)
/// - paths outside `/api/`
/// - `/api/health`
/// - `/api/auth/login`, `/api/auth/register`
/// - `GET /api/image/{filename}` (public image serving)
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // Allow CORS preflight OPTIONS requests
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes skip authentication (they 404 normally)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // Public API routes
    let is_public_api_route = path == "/api/health"
        || path == "/api/auth/login"
        || path == "/api/auth/register"
        || (req.method() == http::Method::GET
            && path.starts_with("/api/image/")
            && path != "/api/image/upload");
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => {
            JwtService::extract_from_header(header).ok_or(AppError::invalid_token())?
        }
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Missing authorization header");
            return Err(AppError::unauthorized());
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token rejected");

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token()),
            }
        }
    }
}

/// Admin middleware - requires the admin role
///
/// Checks `CurrentUser.role == "admin"`; non-admins get 403 Forbidden.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        tracing::warn!(
            target: "security",
            user_id = %user.id,
            username = %user.username,
            role = %user.role,
            "Admin role required"
        );
        return Err(AppError::forbidden("Admin role required".to_string()));
    }

    Ok(next.run(req).await)
}
