//! API routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::error::ApiError;
use crate::extractors::AppState;
use crate::handlers::{auth, companies, jobs, users};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth_router())
        .merge(companies_router())
        .merge(jobs_router())
        .merge(users_router())
        .fallback(not_found)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}

fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/auth/token", post(auth::token))
        .route("/auth/register", post(auth::register))
}

fn companies_router() -> Router<AppState> {
    Router::new()
        .route(
            "/companies",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/companies/:handle",
            get(companies::get_company)
                .patch(companies::update_company)
                .delete(companies::delete_company),
        )
}

fn jobs_router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route(
            "/jobs/:id",
            get(jobs::get_job)
                .patch(jobs::update_job)
                .delete(jobs::delete_job),
        )
}

fn users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:username",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/:username/jobs/:id", post(users::apply_to_job))
}
