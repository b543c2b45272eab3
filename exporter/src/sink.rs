//! Prometheus metric sink.
//!
//! Each scrape gets a fresh [`PrometheusSink`] backed by its own registry, so
//! a metric that could not be collected is simply absent from the output
//! instead of repeating a stale value.

use guacamole::{MetricKind, MetricSample, MetricSink, NAMESPACE};
use prometheus::{Counter, Encoder, Gauge, Opts, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur while exporting samples.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Failed to build or register a metric.
    #[error("Failed to register metric: {0}")]
    Registration(#[from] prometheus::Error),

    /// Failed to encode the registry.
    #[error("Failed to encode metrics: {0}")]
    Encoding(String),
}

/// A [`MetricSink`] that renders samples in the Prometheus text format.
pub struct PrometheusSink {
    registry: Registry,
}

impl PrometheusSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Content type of [`PrometheusSink::encode`] output.
    #[must_use]
    pub fn content_type() -> String {
        TextEncoder::new().format_type().to_string()
    }

    /// Renders every recorded sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the text encoder fails.
    pub fn encode(&self) -> Result<String, SinkError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| SinkError::Encoding(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| SinkError::Encoding(e.to_string()))
    }

    fn register(&self, sample: MetricSample) -> Result<(), SinkError> {
        let opts = Opts::new(sample.name.as_str(), sample.name.help()).namespace(NAMESPACE);

        match sample.kind {
            MetricKind::Gauge => {
                let gauge = Gauge::with_opts(opts)?;
                gauge.set(sample.value);
                self.registry.register(Box::new(gauge))?;
            }
            MetricKind::Counter => {
                let counter = Counter::with_opts(opts)?;
                counter.inc_by(sample.value);
                self.registry.register(Box::new(counter))?;
            }
        }

        Ok(())
    }
}

impl Default for PrometheusSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSink for PrometheusSink {
    fn record(&mut self, sample: MetricSample) {
        if let Err(err) = self.register(sample) {
            tracing::warn!(metric = %sample.name, error = %err, "Dropping metric sample");
        }
    }
}
