//! Guacamole Session Metrics
//!
//! This crate talks to the Apache Guacamole REST API and turns its session
//! data into a handful of metric samples.
//!
//! # Modules
//!
//! - [`models`] - Credentials, auth tokens and metric samples
//! - [`client`] - Token handling and authenticated reads against the API
//! - [`extract`] - Cardinality extraction from raw JSON payloads
//! - [`collector`] - The per-scrape collection cycle
//!
//! # Example
//!
//! ```no_run
//! use guacamole::{ClientConfig, Credentials, GuacamoleClient, MetricSample, SessionMetricsCollector};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::new("https://guac.example.com/guacamole", "admin", "secret", "mysql");
//! let client = GuacamoleClient::new(&ClientConfig::default())?;
//! let collector = SessionMetricsCollector::new(client, credentials);
//!
//! let mut samples: Vec<MetricSample> = Vec::new();
//! collector.collect(&mut samples).await;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod collector;
pub mod error;
pub mod extract;
pub mod models;

pub use client::{ClientConfig, GuacamoleClient, Resource};
pub use collector::SessionMetricsCollector;
pub use error::{AuthError, ClientError, FetchError, ParseError, QueryError};
pub use extract::{extract_count, Shape};
pub use models::{
    AuthToken, Credentials, CredentialsValidationError, MetricKind, MetricName, MetricSample,
    MetricSink, TokenGrant, NAMESPACE,
};
