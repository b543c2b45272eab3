//! Guacamole Exporter
//!
//! This crate serves Apache Guacamole session metrics to Prometheus. Every
//! scrape of the metrics path logs in to Guacamole, counts connection
//! history, users and active connections, and logs out again.
//!
//! # Architecture
//!
//! The exporter is built on Axum and Tokio, providing:
//! - The metrics endpoint (default `/metrics`)
//! - A landing page at `/`
//! - A health check at `/health`
//!
//! # Example
//!
//! ```no_run
//! use exporter::run_server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_server().await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod routes;
mod sink;
mod state;

pub use config::{parse_listen_address, Config, DEFAULT_LISTEN_ADDRESS, DEFAULT_METRICS_PATH};
pub use sink::{PrometheusSink, SinkError};
pub use state::AppState;

use anyhow::{Context, Result};
use axum::Router;
use guacamole::{GuacamoleClient, SessionMetricsCollector};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Runs the exporter with configuration from environment variables.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server() -> Result<()> {
    let config = Config::from_env()?;
    run_server_with_config(config).await
}

/// Runs the exporter with the provided configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The HTTP client cannot be built
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server_with_config(config: Config) -> Result<()> {
    config.validate()?;

    tracing::info!(
        endpoint = %config.credentials.endpoint,
        data_source = %config.credentials.data_source,
        metrics_path = %config.metrics_path,
        "Guacamole exporter starting"
    );

    let state = build_state(&config)?;
    let app = create_router(state);
    let listener = TcpListener::bind(config.listen_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_address))?;

    tracing::info!(addr = %config.listen_address, "Listening for scrapes");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Builds the shared application state from `config`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_state(config: &Config) -> Result<AppState> {
    let client = GuacamoleClient::new(&config.client)?;
    let collector = SessionMetricsCollector::new(client, config.credentials.clone());
    Ok(AppState::new(collector, &config.metrics_path))
}

/// Creates the application router with all routes and middleware.
///
/// This function is public to allow testing the router without starting a full server.
pub fn create_router(state: AppState) -> Router {
    let metrics_path = state.metrics_path().to_string();

    Router::new()
        .merge(routes::landing_routes())
        .merge(routes::metrics_routes(&metrics_path))
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
