//! Liveness of the exporter process itself.
//!
//! Answering here only means the exporter is serving. Guacamole is not
//! contacted; its reachability is reported by `guacamole_up` on the metrics
//! path, which this endpoint advertises so scrapers can be pointed at it.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" if the exporter is reachable.
    pub status: &'static str,
    /// Exporter version.
    pub version: &'static str,
    /// Guacamole data source scraped on every request to `metrics_path`.
    pub data_source: String,
    /// Path the Prometheus exposition is served under.
    pub metrics_path: String,
}

/// Creates the health check route.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Reports the exporter's own status and where to scrape it.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        data_source: state.collector().credentials().data_source.clone(),
        metrics_path: state.metrics_path().to_string(),
    })
}
