//! Job API handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use jobly_core::JobId;
use jobly_db::{JobUpdate, NewJob};
use jobly_queries::jobs::JobFilter;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::error::ApiResult;
use crate::extractors::{AdminUser, AppState, ValidJson, ValidPath, ValidQuery};

/// POST /jobs
pub async fn create_job(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidJson(dto): ValidJson<CreateJobRequest>,
) -> ApiResult<impl IntoResponse> {
    let job = state
        .jobs()
        .create(NewJob {
            title: dto.title,
            salary: dto.salary,
            equity: dto.equity,
            company_handle: dto.company_handle,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

/// GET /jobs?title=&minSalary=&hasEquity=
pub async fn list_jobs(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<JobSearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let jobs = state.jobs().find_all(&query.into()).await?;
    Ok(Json(json!({ "jobs": jobs })))
}

/// GET /jobs/:id
pub async fn get_job(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<JobId>,
) -> ApiResult<impl IntoResponse> {
    let job = state.jobs().get(id).await?;
    Ok(Json(json!({ "job": job })))
}

/// PATCH /jobs/:id
pub async fn update_job(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidPath(id): ValidPath<JobId>,
    ValidJson(dto): ValidJson<UpdateJobRequest>,
) -> ApiResult<impl IntoResponse> {
    let job = state
        .jobs()
        .update(
            id,
            JobUpdate {
                title: dto.title,
                salary: dto.salary,
                equity: dto.equity,
            },
        )
        .await?;

    Ok(Json(json!({ "job": job })))
}

/// DELETE /jobs/:id
pub async fn delete_job(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidPath(id): ValidPath<JobId>,
) -> ApiResult<impl IntoResponse> {
    state.jobs().remove(id).await?;
    Ok(Json(json!({ "deleted": id })))
}

// DTOs
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobSearchQuery {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(range(min = 0))]
    pub min_salary: Option<i32>,
    pub has_equity: Option<bool>,
}

impl From<JobSearchQuery> for JobFilter {
    fn from(query: JobSearchQuery) -> Self {
        JobFilter {
            title: query.title,
            min_salary: query.min_salary,
            has_equity: query.has_equity,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateJobRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub equity: Option<f64>,
    #[validate(length(min = 1, max = 25))]
    pub company_handle: String,
}

/// The company a job belongs to cannot change
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateJobRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub equity: Option<f64>,
}
