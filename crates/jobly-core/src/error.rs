//! Core error types for Jobly
//!
//! Every layer (query builder, repositories, auth) reports failures through
//! [`JoblyError`]; the HTTP layer maps the kind onto a status code.

use thiserror::Error;

/// Core error type for all Jobly operations
#[derive(Error, Debug)]
pub enum JoblyError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Standard Result type for Jobly operations
pub type JoblyResult<T> = Result<T, JoblyError>;

impl JoblyError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        JoblyError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        JoblyError::NotFound(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        JoblyError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        JoblyError::Forbidden(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        JoblyError::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        JoblyError::Internal(message.into())
    }

    /// HTTP status code mapping for errors
    pub fn status_code(&self) -> u16 {
        match self {
            JoblyError::BadRequest(_) => 400,
            JoblyError::Unauthorized(_) => 401,
            JoblyError::Forbidden(_) => 403,
            JoblyError::NotFound(_) => 404,
            JoblyError::Conflict(_) => 409,
            JoblyError::Database(_) | JoblyError::Internal(_) | JoblyError::Config(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            JoblyError::BadRequest(_) => "bad_request",
            JoblyError::NotFound(_) => "not_found",
            JoblyError::Unauthorized(_) => "unauthorized",
            JoblyError::Forbidden(_) => "forbidden",
            JoblyError::Conflict(_) => "conflict",
            JoblyError::Database(_) => "database_error",
            JoblyError::Internal(_) => "internal_error",
            JoblyError::Config(_) => "configuration_error",
        }
    }

    /// True for errors caused by the caller rather than the server
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}
