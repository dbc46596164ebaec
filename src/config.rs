//! Relay configuration.

use crate::allowlist::Allowlists;
use std::time::Duration;

/// Default bound for every outbound call.
pub const DEFAULT_FORWARD_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of custom-device forwards in flight per report.
pub const DEFAULT_CUSTOM_CONCURRENCY: usize = 4;

/// Path segment of the Ruuvi endpoint replaced when deriving the custom one.
const RUUVI_PATH_SUFFIX: &str = "/ruuvi";

/// Path appended when deriving the custom endpoint.
const CUSTOM_PATH: &str = "/custom";

/// Immutable settings shared by every request.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    /// Destination for legacy Ruuvi batches; `None` disables it
    pub ruuvi_endpoint: Option<String>,
    /// Destination for custom sensor documents; `None` disables it
    pub custom_endpoint: Option<String>,
    pub allowlists: Allowlists,
    pub forward_timeout: Duration,
    pub custom_concurrency: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            ruuvi_endpoint: None,
            custom_endpoint: None,
            allowlists: Allowlists::default(),
            forward_timeout: DEFAULT_FORWARD_TIMEOUT,
            custom_concurrency: DEFAULT_CUSTOM_CONCURRENCY,
        }
    }
}

impl RelayConfig {
    /// Ruuvi destination, if configured and non-empty.
    pub fn ruuvi_destination(&self) -> Option<&str> {
        non_empty(self.ruuvi_endpoint.as_deref())
    }

    /// Custom destination, if configured and non-empty.
    pub fn custom_destination(&self) -> Option<&str> {
        non_empty(self.custom_endpoint.as_deref())
    }
}

fn non_empty(url: Option<&str>) -> Option<&str> {
    url.map(str::trim).filter(|url| !url.is_empty())
}

/// Derive the custom endpoint from the Ruuvi endpoint.
///
/// A trailing `/ruuvi` segment is replaced by `/custom`; otherwise `/custom`
/// is appended.
///
/// # Example
/// ```
/// use ruuvi_relay::config::derive_custom_endpoint;
///
/// assert_eq!(
///     derive_custom_endpoint("https://ingest.example.com/ruuvi"),
///     "https://ingest.example.com/custom"
/// );
/// ```
pub fn derive_custom_endpoint(ruuvi_endpoint: &str) -> String {
    let base = ruuvi_endpoint.trim().trim_end_matches('/');
    let base = base.strip_suffix(RUUVI_PATH_SUFFIX).unwrap_or(base);
    format!("{base}{CUSTOM_PATH}")
}
