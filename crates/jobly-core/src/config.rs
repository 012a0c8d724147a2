//! Configuration types and loading
//!
//! Defaults are suitable for local development; every field can be
//! overridden from the environment via [`AppConfig::from_env`].

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Runtime environment (development, test, production)
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "test" => Some(Self::Test),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Database used when `DATABASE_URL` is not set
    pub fn default_database_url(&self) -> &'static str {
        match self {
            Environment::Test => "postgres://localhost/jobly_test",
            _ => "postgres://localhost/jobly",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub pool_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret for HS256 token signing
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_expiration_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl From<ConfigError> for crate::JoblyError {
    fn from(err: ConfigError) -> Self {
        crate::JoblyError::Config(err.to_string())
    }
}

impl AppConfig {
    /// Default configuration for the given environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            database: DatabaseConfig {
                url: environment.default_database_url().to_string(),
                pool_size: 10,
                pool_timeout_seconds: 5,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3001,
            },
            auth: AuthConfig {
                jwt_secret: "secret-dev".to_string(),
                token_expiration_seconds: 86400, // 24 hours
            },
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match std::env::var("JOBLY_ENV") {
            Ok(value) => Environment::parse(&value).ok_or_else(|| ConfigError::InvalidValue {
                key: "JOBLY_ENV".into(),
                message: format!("unknown environment '{}'", value),
            })?,
            Err(_) => Environment::default(),
        };

        let mut config = Self::for_environment(environment);

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }
        if let Ok(size) = std::env::var("DATABASE_POOL_SIZE") {
            config.database.pool_size = parse_var("DATABASE_POOL_SIZE", &size)?;
        }

        if let Ok(host) = std::env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.server.port = parse_var("PORT", &port)?;
        }

        config.auth.jwt_secret = jwt_secret(
            environment,
            std::env::var("SECRET_KEY").ok(),
            &config.auth.jwt_secret,
        )?;
        if let Ok(seconds) = std::env::var("TOKEN_EXPIRATION_SECONDS") {
            config.auth.token_expiration_seconds = parse_var("TOKEN_EXPIRATION_SECONDS", &seconds)?;
        }

        Ok(config)
    }

    /// Get the server address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::SocketAddr;
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or([127, 0, 0, 1].into());
        SocketAddr::new(ip, self.server.port)
    }
}

/// Production never signs tokens with the built-in development secret
fn jwt_secret(
    environment: Environment,
    secret: Option<String>,
    fallback: &str,
) -> Result<String, ConfigError> {
    match secret {
        Some(secret) => Ok(secret),
        None if environment == Environment::Production => Err(ConfigError::InvalidValue {
            key: "SECRET_KEY".into(),
            message: "must be set in production".into(),
        }),
        None => Ok(fallback.to_string()),
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.database.url, "postgres://localhost/jobly");
    }

    #[test]
    fn test_test_environment_uses_test_database() {
        let config = AppConfig::for_environment(Environment::Test);
        assert_eq!(config.database.url, "postgres://localhost/jobly_test");
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("TEST"), Some(Environment::Test));
        assert_eq!(Environment::parse("prod"), Some(Environment::Production));
        assert_eq!(Environment::parse("staging"), None);
    }

    #[test]
    fn test_parse_var_reports_key() {
        let err = parse_var::<u16>("PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let err: crate::JoblyError = err.into();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_production_requires_secret() {
        let err = jwt_secret(Environment::Production, None, "secret-dev").unwrap_err();
        assert!(err.to_string().contains("SECRET_KEY"));

        let secret = jwt_secret(Environment::Production, Some("s3cr3t".into()), "secret-dev");
        assert_eq!(secret.unwrap(), "s3cr3t");
        assert_eq!(
            jwt_secret(Environment::Development, None, "secret-dev").unwrap(),
            "secret-dev"
        );
    }

    #[test]
    fn test_server_addr() {
        let config = AppConfig::default();
        let addr = config.server_addr();
        assert_eq!(addr.port(), 3001);
        assert!(addr.ip().is_loopback());
    }
}
