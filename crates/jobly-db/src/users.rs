//! User repository
//!
//! Database operations for users and their job applications. Password
//! hashes are read only by [`UserRepository::authenticate`] and never leave
//! this module.

use jobly_auth::{hash_password, verify_password};
use jobly_core::{JobId, JoblyError, JoblyResult};
use jobly_queries::users::{USER_COLUMNS, USER_COLUMN_MAP};
use jobly_queries::{build_set_clause, UpdateSet};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::binding::BindValues;
use crate::error::Violation;
use crate::jobs::JobRepository;

/// User database entity
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(FromRow)]
struct CredentialsRow {
    username: String,
    password: String,
    first_name: String,
    last_name: String,
    email: String,
    is_admin: bool,
}

impl From<CredentialsRow> for UserRow {
    fn from(row: CredentialsRow) -> Self {
        Self {
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            is_admin: row.is_admin,
        }
    }
}

/// User with the ids of the jobs they applied to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: UserRow,
    pub jobs: Vec<JobId>,
}

/// DTO for registering a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

/// DTO for updating a user. The username is immutable.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// Plaintext; hashed before storage
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

impl UserUpdate {
    pub fn to_update_set(&self) -> JoblyResult<UpdateSet> {
        let password = self.password.as_deref().map(hash_password).transpose()?;

        Ok(UpdateSet::new()
            .set_opt("password", password)
            .set_opt("firstName", self.first_name.clone())
            .set_opt("lastName", self.last_name.clone())
            .set_opt("email", self.email.clone())
            .set_opt("isAdmin", self.is_admin))
    }
}

/// User repository implementation
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn exists(&self, username: &str) -> JoblyResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Check a username/password pair.
    ///
    /// Unknown users and wrong passwords fail the same way.
    pub async fn authenticate(&self, username: &str, password: &str) -> JoblyResult<UserRow> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT username, password, first_name, last_name, email, is_admin
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) if verify_password(password, &row.password) => Ok(row.into()),
            _ => {
                tracing::warn!(username = %username, "Rejected login");
                Err(JoblyError::unauthorized("Invalid username/password"))
            }
        }
    }

    pub async fn register(&self, dto: NewUser) -> JoblyResult<UserRow> {
        if self.exists(&dto.username).await? {
            return Err(duplicate_username(&dto.username));
        }

        let hashed = hash_password(&dto.password)?;
        let sql = format!(
            "INSERT INTO users (username, password, first_name, last_name, email, is_admin) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {}",
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&dto.username)
            .bind(&hashed)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .bind(&dto.email)
            .bind(dto.is_admin)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match Violation::of(&e) {
                Some(Violation::Unique { .. }) => duplicate_username(&dto.username),
                _ => e.into(),
            })?;

        tracing::info!(username = %row.username, is_admin = row.is_admin, "User registered");
        Ok(row)
    }

    pub async fn find_all(&self) -> JoblyResult<Vec<UserRow>> {
        let sql = format!("SELECT {} FROM users ORDER BY username", USER_COLUMNS);
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn get(&self, username: &str) -> JoblyResult<UserDetail> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, UserRow>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No user: {}", username)))?;

        let jobs = sqlx::query_scalar::<_, JobId>(
            "SELECT job_id FROM applications WHERE username = $1 ORDER BY job_id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(UserDetail { user, jobs })
    }

    pub async fn update(&self, username: &str, dto: UserUpdate) -> JoblyResult<UserRow> {
        let updates = dto.to_update_set()?;
        let clause = build_set_clause(&updates, USER_COLUMN_MAP)?;
        let sql = format!(
            "UPDATE users SET {} WHERE username = {} RETURNING {}",
            clause.set_cols,
            clause.next_placeholder(),
            USER_COLUMNS
        );

        sqlx::query_as::<_, UserRow>(&sql)
            .bind_values(&clause.values)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No user: {}", username)))
    }

    pub async fn remove(&self, username: &str) -> JoblyResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(JoblyError::not_found(format!("No user: {}", username)));
        }

        Ok(())
    }

    /// Record that `username` applied to `job_id`
    pub async fn apply(&self, username: &str, job_id: JobId) -> JoblyResult<()> {
        if !JobRepository::new(self.pool.clone()).exists(job_id).await? {
            return Err(JoblyError::not_found(format!("No job: {}", job_id)));
        }

        if !self.exists(username).await? {
            return Err(JoblyError::not_found(format!("No username: {}", username)));
        }

        let already_applied = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM applications WHERE username = $1 AND job_id = $2)",
        )
        .bind(username)
        .bind(job_id)
        .fetch_one(&self.pool)
        .await?;
        if already_applied {
            return Err(already_applied_error(username, job_id));
        }

        sqlx::query("INSERT INTO applications (username, job_id) VALUES ($1, $2)")
            .bind(username)
            .bind(job_id)
            .execute(&self.pool)
            .await
            .map_err(|e| application_error(e, username, job_id))?;

        tracing::info!(username = %username, job_id, "Application recorded");
        Ok(())
    }
}

fn duplicate_username(username: &str) -> JoblyError {
    JoblyError::bad_request(format!("Duplicate username: {}", username))
}

fn already_applied_error(username: &str, job_id: JobId) -> JoblyError {
    JoblyError::bad_request(format!("{} already applied to job {}", username, job_id))
}

// The user or job may be deleted between the existence checks and the insert
fn application_error(err: sqlx::Error, username: &str, job_id: JobId) -> JoblyError {
    match Violation::of(&err) {
        Some(Violation::Unique { .. }) => already_applied_error(username, job_id),
        Some(violation) if violation.constraint() == Some("applications_username_fkey") => {
            JoblyError::not_found(format!("No username: {}", username))
        }
        Some(Violation::ForeignKey { .. }) => JoblyError::not_found(format!("No job: {}", job_id)),
        None => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::tests::db_error;
    use jobly_queries::SqlValue;
    use sqlx::error::ErrorKind;

    #[test]
    fn test_application_race_is_client_error() {
        let err = application_error(db_error(ErrorKind::UniqueViolation, None), "u1", 1);
        assert_eq!(err.to_string(), "u1 already applied to job 1");

        let err = application_error(
            db_error(ErrorKind::ForeignKeyViolation, Some("applications_username_fkey")),
            "u1",
            1,
        );
        assert_eq!(err.to_string(), "No username: u1");

        let err = application_error(
            db_error(ErrorKind::ForeignKeyViolation, Some("applications_job_id_fkey")),
            "u1",
            1,
        );
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "No job: 1");
    }

    #[test]
    fn test_update_hashes_password() {
        let dto = UserUpdate {
            password: Some("new-password".into()),
            first_name: Some("New".into()),
            ..Default::default()
        };
        let updates = dto.to_update_set().unwrap();
        let clause = build_set_clause(&updates, USER_COLUMN_MAP).unwrap();

        assert_eq!(clause.set_cols, r#""password"=$1, "first_name"=$2"#);
        match &clause.values[0] {
            SqlValue::Text(hash) => {
                assert_ne!(hash, "new-password");
                assert!(verify_password("new-password", hash));
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_empty_update_is_bad_request() {
        let updates = UserUpdate::default().to_update_set().unwrap();
        let err = build_set_clause(&updates, USER_COLUMN_MAP).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_detail_serializes_jobs() {
        let detail = UserDetail {
            user: UserRow {
                username: "u1".into(),
                first_name: "U1F".into(),
                last_name: "U1L".into(),
                email: "u1@email.com".into(),
                is_admin: false,
            },
            jobs: vec![3, 5],
        };
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["firstName"], "U1F");
        assert_eq!(json["isAdmin"], false);
        assert_eq!(json["jobs"], serde_json::json!([3, 5]));
        assert!(json.get("password").is_none());
    }
}
