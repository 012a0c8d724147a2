//! JWT Authentication
//!
//! Tokens are HS256 signed and carry the username and admin flag, so
//! guards never need a database round trip.

use chrono::Utc;
use jobly_core::JoblyError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// JWT ID
    pub jti: String,
}

/// JWT errors
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token is expired")]
    Expired,
    #[error("Invalid token: {0}")]
    Invalid(String),
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),
}

impl From<JwtError> for JoblyError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingFailed(msg) => JoblyError::internal(msg),
            other => JoblyError::unauthorized(other.to_string()),
        }
    }
}

/// JWT service for creating and validating tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_seconds: i64,
}

impl JwtService {
    pub fn new(secret: &[u8], expiration_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiration_seconds,
        }
    }

    /// Issue a token for the given user with the configured lifetime
    pub fn create_token(&self, username: &str, is_admin: bool) -> Result<String, JwtError> {
        self.create_token_expiring_in(username, is_admin, self.expiration_seconds)
    }

    pub fn create_token_expiring_in(
        &self,
        username: &str,
        is_admin: bool,
        expires_in_seconds: i64,
    ) -> Result<String, JwtError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: username.to_string(),
            is_admin,
            iat: now,
            exp: now + expires_in_seconds,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

/// Extract bearer token from Authorization header
pub fn extract_bearer_token(authorization: &str) -> Option<&str> {
    let (scheme, token) = authorization.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        let token = token.trim();
        (!token.is_empty()).then_some(token)
    } else {
        None
    }
}
