//! Job repository
//!
//! Database operations for jobs.

use jobly_core::{JobId, JoblyError, JoblyResult};
use jobly_queries::jobs::{self, JobFilter, JOB_COLUMNS, JOB_COLUMN_MAP};
use jobly_queries::{build_set_clause, UpdateSet};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::binding::BindValues;
use crate::error::Violation;

/// Job database entity
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: JobId,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

/// DTO for creating a job
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

/// DTO for updating a job. Id and company are immutable.
#[derive(Debug, Clone, Default)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
}

impl JobUpdate {
    pub fn to_update_set(&self) -> UpdateSet {
        UpdateSet::new()
            .set_opt("title", self.title.clone())
            .set_opt("salary", self.salary)
            .set_opt("equity", self.equity)
    }
}

/// Job repository implementation
#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn exists(&self, id: JobId) -> JoblyResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    pub async fn create(&self, dto: NewJob) -> JoblyResult<JobRow> {
        let duplicate = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM jobs WHERE title = $1 AND company_handle = $2)",
        )
        .bind(&dto.title)
        .bind(&dto.company_handle)
        .fetch_one(&self.pool)
        .await?;

        if duplicate {
            return Err(JoblyError::bad_request(format!(
                "{} already exists at {}",
                dto.title, dto.company_handle
            )));
        }

        let company_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM companies WHERE handle = $1)")
                .bind(&dto.company_handle)
                .fetch_one(&self.pool)
                .await?;

        if !company_exists {
            return Err(no_company(&dto.company_handle));
        }

        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            JOB_COLUMNS
        );

        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(&dto.title)
            .bind(dto.salary)
            .bind(dto.equity)
            .bind(&dto.company_handle)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match Violation::of(&e) {
                Some(Violation::ForeignKey { .. }) => no_company(&dto.company_handle),
                _ => e.into(),
            })?;

        tracing::info!(id = row.id, company = %row.company_handle, "Job created");
        Ok(row)
    }

    /// List jobs matching the filter, ordered by title.
    ///
    /// No matches is an empty list, not an error.
    pub async fn find_all(&self, filter: &JobFilter) -> JoblyResult<Vec<JobRow>> {
        let query = jobs::filtered_query(filter)?;
        tracing::debug!(sql = %query.sql, "Listing jobs");

        let rows = sqlx::query_as::<_, JobRow>(&query.sql)
            .bind_values(&query.values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn get(&self, id: JobId) -> JoblyResult<JobRow> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
        sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No job with id: {}", id)))
    }

    pub async fn update(&self, id: JobId, dto: JobUpdate) -> JoblyResult<JobRow> {
        let clause = build_set_clause(&dto.to_update_set(), JOB_COLUMN_MAP)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = {} RETURNING {}",
            clause.set_cols,
            clause.next_placeholder(),
            JOB_COLUMNS
        );
        tracing::debug!(sql = %sql, "Updating job");

        sqlx::query_as::<_, JobRow>(&sql)
            .bind_values(&clause.values)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No job with id: {}", id)))
    }

    pub async fn remove(&self, id: JobId) -> JoblyResult<()> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(JoblyError::not_found(format!("No job with id: {}", id)));
        }

        Ok(())
    }
}

fn no_company(handle: &str) -> JoblyError {
    JoblyError::not_found(format!("No company: {}", handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobly_queries::SqlValue;

    #[test]
    fn test_update_set_order() {
        let dto = JobUpdate {
            title: Some("New".into()),
            salary: None,
            equity: Some(0.5),
        };
        let clause = build_set_clause(&dto.to_update_set(), JOB_COLUMN_MAP).unwrap();

        assert_eq!(clause.set_cols, r#""title"=$1, "equity"=$2"#);
        assert_eq!(
            clause.values,
            vec![SqlValue::Text("New".into()), SqlValue::Float(0.5)]
        );
    }

    #[test]
    fn test_row_serializes_camel_case() {
        let row = JobRow {
            id: 7,
            title: "j1".into(),
            salary: Some(100),
            equity: None,
            company_handle: "c1".into(),
        };
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["companyHandle"], "c1");
        assert!(json["equity"].is_null());
    }
}
