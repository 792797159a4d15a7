//! User administration Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::auth::UserInfo;
use crate::core::ServerState;
use crate::db::models::{User, UserUpdate};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/users - list all users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserInfo>>> {
    let repo = UserRepository::new(state.get_db());
    let users = repo.find_all().await?;
    Ok(Json(users.into_iter().map(UserInfo::from).collect()))
}

/// GET /api/users/{id} - get a single user
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserInfo>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;
    Ok(Json(user.into()))
}

/// PUT /api/users/{id} - update a user
///
/// A provided password is re-hashed; other fields keep their value when
/// omitted.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserInfo>> {
    let repo = UserRepository::new(state.get_db());
    let mut user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;

    if let Some(full_name) = payload.full_name {
        user.full_name = full_name;
    }
    if let Some(role) = payload.role {
        if role != "admin" && role != "staff" {
            return Err(AppError::validation(format!("Unknown role: {}", role)));
        }
        user.role = role;
    }
    if let Some(is_active) = payload.is_active {
        user.is_active = is_active;
    }
    if let Some(password) = payload.password {
        if password.len() < 6 {
            return Err(AppError::validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        user.hash_pass = User::hash_password(&password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
    }

    let updated = repo.update(&id, user).await?;
    Ok(Json(updated.into()))
}

/// DELETE /api/users/{id} - delete a user
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = UserRepository::new(state.get_db());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;

    let result = repo.delete(&id).await?;
    tracing::info!(user_id = %id, "User deleted");
    Ok(Json(result))
}
