//! Company API handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use jobly_db::{CompanyUpdate, NewCompany};
use jobly_queries::companies::CompanyFilter;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::error::ApiResult;
use crate::extractors::{AdminUser, AppState, ValidJson, ValidPath, ValidQuery};

/// POST /companies
pub async fn create_company(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidJson(dto): ValidJson<CreateCompanyRequest>,
) -> ApiResult<impl IntoResponse> {
    let company = state
        .companies()
        .create(NewCompany {
            handle: dto.handle,
            name: dto.name,
            description: dto.description,
            num_employees: dto.num_employees,
            logo_url: dto.logo_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// GET /companies?name=&minEmployees=&maxEmployees=
pub async fn list_companies(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<CompanySearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let companies = state.companies().find_all(&query.into()).await?;
    Ok(Json(json!({ "companies": companies })))
}

/// GET /companies/:handle
pub async fn get_company(
    State(state): State<AppState>,
    ValidPath(handle): ValidPath<String>,
) -> ApiResult<impl IntoResponse> {
    let company = state.companies().get(&handle).await?;
    Ok(Json(json!({ "company": company })))
}

/// PATCH /companies/:handle
pub async fn update_company(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidPath(handle): ValidPath<String>,
    ValidJson(dto): ValidJson<UpdateCompanyRequest>,
) -> ApiResult<impl IntoResponse> {
    let company = state
        .companies()
        .update(
            &handle,
            CompanyUpdate {
                name: dto.name,
                description: dto.description,
                num_employees: dto.num_employees,
                logo_url: dto.logo_url,
            },
        )
        .await?;

    Ok(Json(json!({ "company": company })))
}

/// DELETE /companies/:handle
pub async fn delete_company(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidPath(handle): ValidPath<String>,
) -> ApiResult<impl IntoResponse> {
    state.companies().remove(&handle).await?;
    Ok(Json(json!({ "deleted": handle })))
}

// DTOs
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanySearchQuery {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub min_employees: Option<i32>,
    #[validate(range(min = 0))]
    pub max_employees: Option<i32>,
}

impl From<CompanySearchQuery> for CompanyFilter {
    fn from(query: CompanySearchQuery) -> Self {
        CompanyFilter {
            name: query.name,
            min_employees: query.min_employees,
            max_employees: query.max_employees,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, max = 25))]
    pub handle: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0))]
    pub num_employees: Option<i32>,
    #[validate(url)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub num_employees: Option<i32>,
    #[validate(url)]
    pub logo_url: Option<String>,
}
