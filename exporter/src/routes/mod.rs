//! HTTP route definitions.
//!
//! This module organizes all routes served by the exporter.

mod health;
mod landing;
mod metrics;

pub use health::health_routes;
pub use landing::landing_routes;
pub use metrics::metrics_routes;
