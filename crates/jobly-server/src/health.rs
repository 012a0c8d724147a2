//! Health Check System

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use jobly_db::Database;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

/// Individual component health
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Overall health report
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Health checker configuration
#[derive(Debug, Clone)]
pub struct HealthConfig {
    /// Timeout for individual health checks
    pub check_timeout: Duration,
    /// Cache duration for health results
    pub cache_duration: Duration,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            check_timeout: Duration::from_secs(5),
            cache_duration: Duration::from_secs(10),
        }
    }
}

struct CachedHealth {
    report: HealthReport,
    cached_at: Instant,
}

/// Health checker service
pub struct HealthChecker {
    config: HealthConfig,
    start_time: Instant,
    cache: RwLock<Option<CachedHealth>>,
    database: Option<Database>,
}

impl HealthChecker {
    pub fn new(config: HealthConfig) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            cache: RwLock::new(None),
            database: None,
        }
    }

    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// Get cached health or perform checks
    pub async fn check(&self) -> HealthReport {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                if cached.cached_at.elapsed() < self.config.cache_duration {
                    debug!("Returning cached health report");
                    return cached.report.clone();
                }
            }
        }

        let report = self.perform_checks().await;

        {
            let mut cache = self.cache.write().await;
            *cache = Some(CachedHealth {
                report: report.clone(),
                cached_at: Instant::now(),
            });
        }

        report
    }

    async fn perform_checks(&self) -> HealthReport {
        let mut components = Vec::new();

        if let Some(ref database) = self.database {
            components.push(self.check_database(database).await);
        }

        let status = if components.iter().all(|c| c.status.is_healthy()) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            components,
            timestamp: chrono::Utc::now(),
        }
    }

    async fn check_database(&self, database: &Database) -> ComponentHealth {
        let start = Instant::now();

        let (status, message) =
            match tokio::time::timeout(self.config.check_timeout, database.ping()).await {
                Ok(Ok(())) => (HealthStatus::Healthy, "Connected".to_string()),
                Ok(Err(e)) => {
                    warn!(error = %e, "Database health check failed");
                    (HealthStatus::Unhealthy, e.to_string())
                }
                Err(_) => {
                    warn!("Database health check timed out");
                    (HealthStatus::Unhealthy, "Timed out".to_string())
                }
            };

        let stats = database.stats();

        ComponentHealth {
            name: "database".to_string(),
            status,
            message: Some(message),
            response_time_ms: start.elapsed().as_millis() as u64,
            details: Some(serde_json::json!({
                "type": "postgresql",
                "pool_size": stats.size,
                "idle_connections": stats.idle
            })),
        }
    }
}

/// Simple liveness check
pub async fn liveness() -> &'static str {
    "OK"
}

/// Readiness check, including the database
pub async fn readiness(
    State(checker): State<Arc<HealthChecker>>,
) -> (StatusCode, Json<HealthReport>) {
    let report = checker.check().await;
    let status = report.http_status();
    (status, Json(report))
}
