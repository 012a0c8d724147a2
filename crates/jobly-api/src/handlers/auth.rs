//! Token issuing handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use jobly_db::NewUser;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, ValidJson};

/// POST /auth/token
///
/// `{ username, password }` => `{ token }`
pub async fn token(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<TokenRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state.users().authenticate(&dto.username, &dto.password).await?;
    let token = state
        .jwt
        .create_token(&user.username, user.is_admin)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(TokenResponse { token }))
}

/// POST /auth/register
///
/// Self-registration never grants admin.
pub async fn register(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .users()
        .register(NewUser {
            username: dto.username,
            password: dto.password,
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            is_admin: false,
        })
        .await?;

    let token = state
        .jwt
        .create_token(&user.username, user.is_admin)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TokenRequest {
    #[validate(length(min = 1, max = 25))]
    pub username: String,
    #[validate(length(min = 1, max = 20))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
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
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
