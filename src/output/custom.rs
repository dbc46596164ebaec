//! Per-device document for custom sensors.

use crate::classify::CustomCandidate;
use crate::measurement::CustomReading;
use serde::Serialize;

/// One custom sensor reading as posted to the custom endpoint.
///
/// Reading fields are flattened into the top level; absent values are sent
/// as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomDocument<'a> {
    pub mac: &'a str,
    pub gw_mac: Option<&'a str>,
    /// Tag timestamp, or the gateway timestamp when the tag has none
    pub timestamp: Option<i64>,
    /// Advertising data hex string as received
    pub raw: &'a str,
    #[serde(flatten)]
    pub reading: &'a CustomReading,
}

impl<'a> CustomDocument<'a> {
    pub fn new(
        mac: &'a str,
        candidate: &'a CustomCandidate,
        gw_mac: Option<&'a str>,
        gateway_timestamp: Option<i64>,
    ) -> Self {
        Self {
            mac,
            gw_mac,
            timestamp: candidate.timestamp.or(gateway_timestamp),
            raw: &candidate.raw,
            reading: &candidate.reading,
        }
    }
}
