//! Axum extractors for API handlers

use axum::{
    async_trait,
    extract::{FromRef, FromRequest, FromRequestParts, Path, Query, Request},
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use jobly_auth::{extract_bearer_token, permissions, CurrentUser, JwtService};
use jobly_core::config::AppConfig;
use jobly_db::{CompanyRepository, Database, JobRepository, UserRepository};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use validator::Validate;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig) -> Self {
        let jwt = JwtService::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.token_expiration_seconds as i64,
        );

        Self {
            db,
            jwt: Arc::new(jwt),
            config: Arc::new(config),
        }
    }

    pub fn companies(&self) -> CompanyRepository {
        CompanyRepository::new(self.db.pool().clone())
    }

    pub fn jobs(&self) -> JobRepository {
        JobRepository::new(self.db.pool().clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.db.pool().clone())
    }
}

/// The caller, if a valid bearer token was sent.
///
/// A missing or invalid token is not an error here; the guards decide.
pub struct MaybeUser(pub Option<CurrentUser>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let Some(token) = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_bearer_token)
        else {
            return Ok(MaybeUser(None));
        };

        match app_state.jwt.validate_token(token) {
            Ok(claims) => Ok(MaybeUser(Some(claims.into()))),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring bearer token");
                Ok(MaybeUser(None))
            }
        }
    }
}

impl MaybeUser {
    pub fn user(&self) -> Option<&CurrentUser> {
        self.0.as_ref()
    }
}

/// Logged in admin extractor
pub struct AdminUser(pub CurrentUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let MaybeUser(user) = MaybeUser::from_request_parts(parts, state).await?;
        let admin = permissions::ensure_admin(user.as_ref())?;
        Ok(AdminUser(admin.clone()))
    }
}

impl std::ops::Deref for AdminUser {
    type Target = CurrentUser;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// JSON body that passed deserialization and validation
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

/// Query string that passed deserialization and validation
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidQuery(value))
    }
}

/// Path parameters that parsed into `T`
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        Ok(ValidPath(value))
    }
}
