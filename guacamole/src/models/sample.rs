//! Metric sample model.
//!
//! Defines the four samples a collection cycle can produce, their fixed
//! descriptors, and the sink they are handed to.

use std::fmt;

/// Namespace prefixed to every metric name.
pub const NAMESPACE: &str = "guacamole";

/// Kind of metric a sample is exposed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// A value that can go up or down.
    Gauge,
    /// A value that only increases.
    Counter,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gauge => write!(f, "gauge"),
            Self::Counter => write!(f, "counter"),
        }
    }
}

/// The metrics a collection cycle can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    /// Whether authentication against Guacamole succeeded.
    Up,
    /// Number of entries in the connection history.
    ConnectionHistoryTotal,
    /// Number of registered users.
    UserCount,
    /// Number of active connections.
    ActiveConnectionCount,
}

impl MetricName {
    /// Every metric, in emission order.
    pub const ALL: [Self; 4] = [
        Self::Up,
        Self::ConnectionHistoryTotal,
        Self::UserCount,
        Self::ActiveConnectionCount,
    ];

    /// Metric name without the namespace.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::ConnectionHistoryTotal => "connection_history_total",
            Self::UserCount => "number_of_users",
            Self::ActiveConnectionCount => "number_of_active_connections",
        }
    }

    /// Help text exposed alongside the metric.
    #[must_use]
    pub const fn help(self) -> &'static str {
        match self {
            Self::Up => "Was the last Guacamole query successful.",
            Self::ConnectionHistoryTotal => "The total number of established connections",
            Self::UserCount => "The current number of registered users",
            Self::ActiveConnectionCount => "The current number of active connections",
        }
    }

    /// Kind the metric is exposed as.
    #[must_use]
    pub const fn kind(self) -> MetricKind {
        match self {
            Self::ConnectionHistoryTotal => MetricKind::Counter,
            Self::Up | Self::UserCount | Self::ActiveConnectionCount => MetricKind::Gauge,
        }
    }

    /// Fully qualified name, e.g. `guacamole_number_of_users`.
    #[must_use]
    pub fn fq_name(self) -> String {
        format!("{NAMESPACE}_{}", self.as_str())
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single value produced by a collection cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample {
    /// Which metric this is.
    pub name: MetricName,
    /// The observed value.
    pub value: f64,
    /// How the value is exposed.
    pub kind: MetricKind,
}

impl MetricSample {
    /// Creates a sample, taking the kind from the metric's descriptor.
    #[must_use]
    pub fn new(name: MetricName, value: f64) -> Self {
        Self {
            name,
            value,
            kind: name.kind(),
        }
    }

    /// Creates the liveness sample.
    #[must_use]
    pub fn up(reachable: bool) -> Self {
        Self::new(MetricName::Up, if reachable { 1.0 } else { 0.0 })
    }

    /// Creates a sample from an item count.
    #[must_use]
    pub fn count(name: MetricName, count: usize) -> Self {
        // Counts come from JSON collections and stay far below 2^52
        #[allow(clippy::cast_precision_loss)]
        let value = count as f64;
        Self::new(name, value)
    }
}

/// Receiver for the samples of a collection cycle.
pub trait MetricSink {
    /// Records one sample.
    fn record(&mut self, sample: MetricSample);
}

impl MetricSink for Vec<MetricSample> {
    fn record(&mut self, sample: MetricSample) {
        self.push(sample);
    }
}
