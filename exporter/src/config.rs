//! Exporter configuration module.
//!
//! Handles loading the Guacamole credentials from environment variables and
//! holds the listener settings supplied on the command line.

use anyhow::{ensure, Context, Result};
use guacamole::{ClientConfig, Credentials};
use std::net::SocketAddr;
use std::time::Duration;

/// Default address the exporter listens on.
pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:9623";

/// Default path metrics are served under.
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

/// Parses a listen address, accepting a bare `:port` as all interfaces.
///
/// # Errors
///
/// Returns a message if `raw` is not a socket address.
pub fn parse_listen_address(raw: &str) -> Result<SocketAddr, String> {
    let full = match raw.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => raw.to_string(),
    };
    full.parse()
        .map_err(|e| format!("invalid listen address '{raw}': {e}"))
}

/// Exporter configuration.
///
/// Credentials are read from environment variables:
/// - `GUACAMOLE_ENDPOINT`: Base URL of the Guacamole web application
/// - `GUACAMOLE_USERNAME`: User to log in as
/// - `GUACAMOLE_PASSWORD`: Password of that user
/// - `GUACAMOLE_DATASOURCE`: Data source to query (e.g. `mysql`)
/// - `GUACAMOLE_TIMEOUT_SECS`: Per-request timeout (default: 10)
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to listen on for scrapes.
    pub listen_address: SocketAddr,
    /// Path under which metrics are exposed.
    pub metrics_path: String,
    /// Guacamole login details.
    pub credentials: Credentials,
    /// Settings for the Guacamole HTTP client.
    pub client: ClientConfig,
}

impl Config {
    /// Creates a configuration with default listener settings.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            listen_address: SocketAddr::from(([0, 0, 0, 0], 9623)),
            metrics_path: DEFAULT_METRICS_PATH.to_string(),
            credentials,
            client: ClientConfig::default(),
        }
    }

    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A required `GUACAMOLE_*` variable is missing
    /// - `GUACAMOLE_TIMEOUT_SECS` is set but is not a positive integer
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a new configuration using `lookup` to resolve variables.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).with_context(|| format!("Missing required environment variable {key}"))
        };

        let credentials = Credentials::new(
            required("GUACAMOLE_ENDPOINT")?,
            required("GUACAMOLE_USERNAME")?,
            required("GUACAMOLE_PASSWORD")?,
            required("GUACAMOLE_DATASOURCE")?,
        );

        let mut config = Self::new(credentials);

        if let Some(raw) = lookup("GUACAMOLE_TIMEOUT_SECS") {
            let secs: u64 = raw
                .parse()
                .with_context(|| format!("Invalid GUACAMOLE_TIMEOUT_SECS value '{raw}'"))?;
            ensure!(secs > 0, "GUACAMOLE_TIMEOUT_SECS must be greater than zero");
            config.client.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Sets the listen address.
    #[must_use]
    pub fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Sets the metrics path.
    #[must_use]
    pub fn with_metrics_path(mut self, metrics_path: impl Into<String>) -> Self {
        self.metrics_path = metrics_path.into();
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The credentials are invalid
    /// - The metrics path does not start with `/` or collides with `/` or `/health`
    /// - The metrics path contains `{` or `}`, which the router reads as captures
    pub fn validate(&self) -> Result<()> {
        self.credentials.validate_credentials()?;

        ensure!(
            self.metrics_path.starts_with('/'),
            "Metrics path '{}' must start with '/'",
            self.metrics_path
        );
        ensure!(
            self.metrics_path != "/" && self.metrics_path != "/health",
            "Metrics path '{}' is reserved",
            self.metrics_path
        );
        ensure!(
            !self.metrics_path.contains(['{', '}']),
            "Metrics path '{}' may not contain '{{' or '}}'",
            self.metrics_path
        );

        Ok(())
    }
}
