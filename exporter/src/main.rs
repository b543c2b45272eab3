//! Guacamole Exporter Binary
//!
//! Entry point for the Prometheus exporter.
//!
//! # Usage
//!
//! ```bash
//! GUACAMOLE_ENDPOINT=https://guac.example.com/guacamole \
//! GUACAMOLE_USERNAME=exporter GUACAMOLE_PASSWORD=secret GUACAMOLE_DATASOURCE=mysql \
//!     guacamole_exporter --web.listen-address 0.0.0.0:9623
//! ```

#![deny(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use exporter::{parse_listen_address, Config, DEFAULT_LISTEN_ADDRESS, DEFAULT_METRICS_PATH};
use std::net::SocketAddr;

/// Prometheus exporter for Apache Guacamole session metrics
#[derive(Parser)]
#[command(name = "guacamole_exporter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on for telemetry (`:port` binds all interfaces)
    #[arg(
        long = "web.listen-address",
        env = "GUACAMOLE_EXPORTER_LISTEN_ADDRESS",
        default_value = DEFAULT_LISTEN_ADDRESS,
        value_parser = parse_listen_address
    )]
    listen_address: SocketAddr,

    /// Path under which to expose metrics
    #[arg(
        long = "web.telemetry-path",
        env = "GUACAMOLE_EXPORTER_TELEMETRY_PATH",
        default_value = DEFAULT_METRICS_PATH
    )]
    telemetry_path: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so env fallbacks see its values
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "Loaded .env file"),
        Err(_) => tracing::info!("No .env file loaded, assuming variables are set"),
    }

    let config = Config::from_env()?
        .with_listen_address(cli.listen_address)
        .with_metrics_path(cli.telemetry_path);

    exporter::run_server_with_config(config).await
}
