//! Application state module.
//!
//! Defines the shared state that is passed to route handlers.

use guacamole::SessionMetricsCollector;
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// The collector and its HTTP client are built once at startup; each scrape
/// only borrows them.
#[derive(Clone)]
pub struct AppState {
    /// The collection cycle run on every scrape.
    collector: Arc<SessionMetricsCollector>,
    /// Path under which metrics are exposed.
    metrics_path: Arc<str>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(collector: SessionMetricsCollector, metrics_path: &str) -> Self {
        Self {
            collector: Arc::new(collector),
            metrics_path: Arc::from(metrics_path),
        }
    }

    /// Returns a reference to the collector.
    #[must_use]
    pub fn collector(&self) -> &SessionMetricsCollector {
        self.collector.as_ref()
    }

    /// Returns the metrics path.
    #[must_use]
    pub fn metrics_path(&self) -> &str {
        &self.metrics_path
    }
}
