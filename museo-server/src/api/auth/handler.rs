//! Authentication Handlers
//!
//! Handles login, registration and current-user queries.

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{User, UserRegister};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login request payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response payload
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Public user information
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: i64,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
            username: user.username,
            full_name: user.full_name,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// POST /api/auth/login - authenticate and issue a JWT
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo.find_by_username(&req.username).await?;

    // Fixed delay to prevent timing attacks (before checking the result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let user = match user {
        Some(u) => {
            if !u.is_active {
                return Err(AppError::forbidden("Account has been disabled".to_string()));
            }

            let password_valid = u
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = user.id.as_ref().map(|i| i.to_string()).unwrap_or_default();

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.username, &user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user_id,
        username = %user.username,
        role = %user.role,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/auth/register - create a new account
///
/// New accounts default to the "staff" role.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserRegister>,
) -> AppResult<Json<UserInfo>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let role = match payload.role.as_deref() {
        None | Some("") => "staff".to_string(),
        Some("admin") | Some("staff") => payload.role.clone().unwrap_or_default(),
        Some(other) => {
            return Err(AppError::validation(format!("Unknown role: {}", other)));
        }
    };

    let hash_pass = User::hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let user = User {
        id: None,
        full_name: payload.full_name,
        username: payload.username,
        hash_pass,
        role,
        is_active: true,
        created_at: chrono::Utc::now().timestamp_millis(),
    };

    let repo = UserRepository::new(state.get_db());
    let created = repo.create(user).await?;

    tracing::info!(username = %created.username, "User registered");

    Ok(Json(created.into()))
}

/// GET /api/auth/me - current user info
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    let repo = UserRepository::new(state.get_db());
    let stored = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", user.id)))?;

    Ok(Json(stored.into()))
}

/// POST /api/auth/logout
///
/// Stateless tokens cannot be revoked server-side; this endpoint exists for
/// the audit trail.
pub async fn logout(Extension(user): Extension<CurrentUser>) -> AppResult<Json<()>> {
    tracing::info!(
        user_id = %user.id,
        username = %user.username,
        "User logged out"
    );

    Ok(Json(()))
}
