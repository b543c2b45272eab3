//! Metrics endpoint.
//!
//! Every request runs one Guacamole collection cycle and renders whatever it
//! produced. A Guacamole outage shows up as `guacamole_up 0`, never as a
//! failed scrape.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};

use crate::sink::PrometheusSink;
use crate::state::AppState;

/// Creates the metrics route under `path`.
pub fn metrics_routes(path: &str) -> Router<AppState> {
    Router::new().route(path, get(scrape))
}

async fn scrape(State(state): State<AppState>) -> Response {
    let mut sink = PrometheusSink::new();
    state.collector().collect(&mut sink).await;

    match sink.encode() {
        Ok(body) => (
            [(header::CONTENT_TYPE, PrometheusSink::content_type())],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
