//! Gateway-format batch for legacy Ruuvi tags.

use crate::report::GatewayReport;
use serde_json::{Map, Value, json};

/// Build the batch document for the authorized legacy tags.
///
/// Envelope fields are copied from the incoming report; ones the gateway did
/// not send are emitted as `null`.
pub fn legacy_batch(report: &GatewayReport, tags: Map<String, Value>) -> Value {
    json!({
        "data": {
            "coordinates": report.coordinates,
            "timestamp": report.timestamp,
            "nonce": report.nonce,
            "gw_mac": report.gw_mac,
            "tags": tags,
        }
    })
}
