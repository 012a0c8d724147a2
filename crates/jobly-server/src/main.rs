//! Jobly Server
//!
//! HTTP server for the Jobly job board API.

use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobly_api::AppState;
use jobly_core::config::AppConfig;
use jobly_db::Database;

mod health;

use health::{HealthChecker, HealthConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        host = %config.server.host,
        port = config.server.port,
        "Starting Jobly"
    );

    let db = Database::connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await.context("Failed to run migrations")?;

    let health = Arc::new(HealthChecker::new(HealthConfig::default()).with_database(db.clone()));
    let addr = config.server_addr();
    let app = build_router(AppState::new(db.clone(), config), health);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,jobly_server=debug,jobly_api=debug,jobly_db=debug,tower_http=debug".into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Build the application router
fn build_router(state: AppState, health: Arc<HealthChecker>) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(health);

    Router::new()
        .merge(health_routes)
        .merge(jobly_api::router().with_state(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
