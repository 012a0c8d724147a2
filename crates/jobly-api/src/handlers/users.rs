//! User API handlers
//!
//! Admins manage every account; other users only their own.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use jobly_auth::permissions::ensure_correct_user_or_admin;
use jobly_core::JobId;
use jobly_db::{NewUser, UserUpdate};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AdminUser, AppState, MaybeUser, ValidJson, ValidPath};

/// POST /users
///
/// Admin-only; unlike registration this may create admins.
/// Returns the new user and a token for them.
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidJson(dto): ValidJson<CreateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .users()
        .register(NewUser {
            username: dto.username,
            password: dto.password,
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            is_admin: dto.is_admin,
        })
        .await?;

    let token = state
        .jwt
        .create_token(&user.username, user.is_admin)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(json!({ "user": user, "token": token }))))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<impl IntoResponse> {
    let users = state.users().find_all().await?;
    Ok(Json(json!({ "users": users })))
}

/// GET /users/:username
pub async fn get_user(
    State(state): State<AppState>,
    caller: MaybeUser,
    ValidPath(username): ValidPath<String>,
) -> ApiResult<impl IntoResponse> {
    ensure_correct_user_or_admin(caller.user(), &username)?;
    let user = state.users().get(&username).await?;
    Ok(Json(json!({ "user": user })))
}

/// PATCH /users/:username
pub async fn update_user(
    State(state): State<AppState>,
    caller: MaybeUser,
    ValidPath(username): ValidPath<String>,
    ValidJson(dto): ValidJson<UpdateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let caller = ensure_correct_user_or_admin(caller.user(), &username)?;
    if dto.is_admin.is_some() && !caller.is_admin {
        return Err(ApiError::forbidden("Only admins may change isAdmin"));
    }

    let user = state
        .users()
        .update(
            &username,
            UserUpdate {
                password: dto.password,
                first_name: dto.first_name,
                last_name: dto.last_name,
                email: dto.email,
                is_admin: dto.is_admin,
            },
        )
        .await?;

    Ok(Json(json!({ "user": user })))
}

/// DELETE /users/:username
pub async fn delete_user(
    State(state): State<AppState>,
    caller: MaybeUser,
    ValidPath(username): ValidPath<String>,
) -> ApiResult<impl IntoResponse> {
    ensure_correct_user_or_admin(caller.user(), &username)?;
    state.users().remove(&username).await?;
    Ok(Json(json!({ "deleted": username })))
}

/// POST /users/:username/jobs/:id
pub async fn apply_to_job(
    State(state): State<AppState>,
    caller: MaybeUser,
    ValidPath((username, job_id)): ValidPath<(String, JobId)>,
) -> ApiResult<impl IntoResponse> {
    ensure_correct_user_or_admin(caller.user(), &username)?;
    state.users().apply(&username, job_id).await?;
    Ok(Json(json!({ "applied": job_id })))
}

// DTOs
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 25))]
    pub username: String,
    #[validate(length(min = 5, max = 20))]
    pub password: String,
    #[validate(length(min = 1, max = 25))]
    pub first_name: String,
    #[validate(length(min = 1, max = 25))]
    pub last_name: String,
    #[validate(email, length(min = 6, max = 60))]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(length(min = 5, max = 20))]
    pub password: Option<String>,
    #[validate(length(min = 1, max = 25))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 25))]
    pub last_name: Option<String>,
    #[validate(email, length(min = 6, max = 60))]
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}
