//! Company repository
//!
//! Database operations for companies.

use jobly_core::{JoblyError, JoblyResult};
use jobly_queries::companies::{self, CompanyFilter, COMPANY_COLUMNS, COMPANY_COLUMN_MAP};
use jobly_queries::{build_set_clause, UpdateSet};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::binding::BindValues;
use crate::error::Violation;

const COMPANY_NAME_KEY: &str = "companies_name_key";

/// Company database entity
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRow {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A job as listed under its company
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyJob {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
}

/// Company with its open jobs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: CompanyRow,
    pub jobs: Vec<CompanyJob>,
}

/// DTO for creating a company
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// DTO for updating a company. The handle is immutable.
#[derive(Debug, Clone, Default)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl CompanyUpdate {
    pub fn to_update_set(&self) -> UpdateSet {
        UpdateSet::new()
            .set_opt("name", self.name.clone())
            .set_opt("description", self.description.clone())
            .set_opt("numEmployees", self.num_employees)
            .set_opt("logoUrl", self.logo_url.clone())
    }
}

/// Company repository implementation
#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn exists(&self, handle: &str) -> JoblyResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM companies WHERE handle = $1)")
                .bind(handle)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    pub async fn create(&self, dto: NewCompany) -> JoblyResult<CompanyRow> {
        if self.exists(&dto.handle).await? {
            return Err(JoblyError::bad_request(format!(
                "Duplicate company: {}",
                dto.handle
            )));
        }

        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            COMPANY_COLUMNS
        );

        let row = sqlx::query_as::<_, CompanyRow>(&sql)
            .bind(&dto.handle)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.num_employees)
            .bind(&dto.logo_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| insert_error(e, &dto))?;

        tracing::info!(handle = %row.handle, "Company created");
        Ok(row)
    }

    /// List companies matching the filter, ordered by name.
    ///
    /// No matches is an empty list, not an error.
    pub async fn find_all(&self, filter: &CompanyFilter) -> JoblyResult<Vec<CompanyRow>> {
        let query = companies::filtered_query(filter)?;
        tracing::debug!(sql = %query.sql, "Listing companies");

        let rows = sqlx::query_as::<_, CompanyRow>(&query.sql)
            .bind_values(&query.values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn get(&self, handle: &str) -> JoblyResult<CompanyDetail> {
        let sql = format!("SELECT {} FROM companies WHERE handle = $1", COMPANY_COLUMNS);
        let company = sqlx::query_as::<_, CompanyRow>(&sql)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No company: {}", handle)))?;

        let jobs = sqlx::query_as::<_, CompanyJob>(
            r#"
            SELECT id, title, salary, equity
            FROM jobs
            WHERE company_handle = $1
            ORDER BY id
            "#,
        )
        .bind(handle)
        .fetch_all(&self.pool)
        .await?;

        Ok(CompanyDetail { company, jobs })
    }

    pub async fn update(&self, handle: &str, dto: CompanyUpdate) -> JoblyResult<CompanyRow> {
        let clause = build_set_clause(&dto.to_update_set(), COMPANY_COLUMN_MAP)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = {} RETURNING {}",
            clause.set_cols,
            clause.next_placeholder(),
            COMPANY_COLUMNS
        );
        tracing::debug!(sql = %sql, "Updating company");

        let row = sqlx::query_as::<_, CompanyRow>(&sql)
            .bind_values(&clause.values)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| update_error(e, &dto))?
            .ok_or_else(|| JoblyError::not_found(format!("No company: {}", handle)))?;

        Ok(row)
    }

    pub async fn remove(&self, handle: &str) -> JoblyResult<()> {
        let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
            .bind(handle)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(JoblyError::not_found(format!("No company: {}", handle)));
        }

        tracing::info!(handle = %handle, "Company removed");
        Ok(())
    }
}

fn duplicate_name(name: &str) -> JoblyError {
    JoblyError::conflict(format!("Duplicate company name: {}", name))
}

fn insert_error(err: sqlx::Error, dto: &NewCompany) -> JoblyError {
    match Violation::of(&err) {
        Some(violation) if violation.constraint() == Some(COMPANY_NAME_KEY) => {
            duplicate_name(&dto.name)
        }
        Some(Violation::Unique { .. }) => {
            JoblyError::bad_request(format!("Duplicate company: {}", dto.handle))
        }
        _ => err.into(),
    }
}

// Only the name is both unique and updatable
fn update_error(err: sqlx::Error, dto: &CompanyUpdate) -> JoblyError {
    match Violation::of(&err) {
        Some(Violation::Unique { .. }) => duplicate_name(dto.name.as_deref().unwrap_or_default()),
        _ => err.into(),
    }
}
