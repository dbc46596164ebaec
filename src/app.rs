//! Process-level wiring for `ruuvi-relay`.
//!
//! Turns command line / environment options into an immutable
//! [`RelayConfig`] and serves the HTTP front end until shutdown. The binary
//! (`src/main.rs`) only adds logging setup and exit codes.

use crate::allowlist::{self, Allowlists};
use crate::config::{DEFAULT_CUSTOM_CONCURRENCY, RelayConfig, derive_custom_endpoint};
use crate::forward::HttpForwarder;
use crate::router::Relay;
use crate::server::{AppState, router};
use clap::Parser;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

/// Configuration for the relay process.
#[derive(Parser, Debug, Clone)]
#[command(author, about, version)]
pub struct Options {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Endpoint receiving Ruuvi Gateway batches of legacy tags.
    /// Leave unset to disable legacy forwarding.
    #[arg(long, env = "PI_ENDPOINT")]
    pub ruuvi_endpoint: Option<String>,

    /// Endpoint receiving one document per custom sensor.
    /// Defaults to the Ruuvi endpoint with its trailing /ruuvi replaced by /custom.
    #[arg(long, env = "CUSTOM_ENDPOINT")]
    pub custom_endpoint: Option<String>,

    /// Shared key required in the X-API-Key header. Unset disables the check.
    #[arg(long, env = "RELAY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// MAC addresses of legacy Ruuvi tags to forward (comma separated or repeated)
    #[arg(long, env = "RUUVI_ALLOWLIST", value_delimiter = ',', value_name = "MAC")]
    pub ruuvi_allowlist: Vec<String>,

    /// MAC addresses of custom sensors to forward (comma separated or repeated)
    #[arg(long, env = "CUSTOM_ALLOWLIST", value_delimiter = ',', value_name = "MAC")]
    pub custom_allowlist: Vec<String>,

    /// Timeout for each outbound request.
    /// Accepts duration with suffix: 10s, 1m, 500ms.
    /// Without suffix, value is interpreted as seconds.
    #[arg(long, default_value = "10s", value_parser = crate::duration::parse_timeout)]
    pub forward_timeout: Duration,

    /// Maximum number of custom sensor forwards in flight per request
    #[arg(long, default_value_t = DEFAULT_CUSTOM_CONCURRENCY)]
    pub custom_concurrency: usize,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Verbose output, shorthand for --log-level debug
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Options {
    /// Build the immutable relay configuration.
    pub fn to_config(&self) -> RelayConfig {
        let ruuvi_endpoint = self.ruuvi_endpoint.clone().filter(|url| !url.trim().is_empty());
        let custom_endpoint = self
            .custom_endpoint
            .clone()
            .or_else(|| ruuvi_endpoint.as_deref().map(derive_custom_endpoint));

        RelayConfig {
            ruuvi_endpoint,
            custom_endpoint,
            allowlists: Allowlists {
                legacy: allowlist::from_entries(&self.ruuvi_allowlist),
                custom: allowlist::from_entries(&self.custom_allowlist),
            },
            forward_timeout: self.forward_timeout,
            custom_concurrency: self.custom_concurrency.max(1),
        }
    }

    /// Effective log level after applying `--verbose`.
    pub fn log_level(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            self.log_level.as_str()
        }
    }
}

/// Errors returned by the relay process.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Serve the relay until ctrl-c.
pub async fn run(options: Options) -> Result<(), RunError> {
    let config = options.to_config();
    info!(
        ruuvi_endpoint = config.ruuvi_destination().unwrap_or("disabled"),
        custom_endpoint = config.custom_destination().unwrap_or("disabled"),
        ruuvi_allowlist = config.allowlists.legacy.len(),
        custom_allowlist = config.allowlists.custom.len(),
        timeout = ?config.forward_timeout,
        "relay configured"
    );

    let relay = Relay::new(config, Arc::new(HttpForwarder::new()?));
    let app = router(AppState::new(relay, options.api_key.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], options.port));
    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    // If the handler cannot be installed, run until killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
