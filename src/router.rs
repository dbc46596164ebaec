//! Fan-out of one gateway report to the ingestion endpoints.
//!
//! Each report is processed on its own: tags are classified, checked against
//! the allow-list of their class, and then
//! - all authorized legacy tags go out as one batch (all-or-nothing), and
//! - every authorized custom tag goes out as its own request, independently.

use crate::allowlist::DeviceClass;
use crate::classify::{Classification, CustomCandidate, classify};
use crate::config::RelayConfig;
use crate::forward::{Forwarder, forward_json};
use crate::output::{CustomDocument, legacy_batch};
use crate::report::{GatewayReport, InvalidPayload};
use futures::StreamExt;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Forwarded device counts for one report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ForwardOutcome {
    pub ruuvi_forwarded: usize,
    pub custom_forwarded: usize,
}

/// Authorized tags of one report, split by destination.
#[derive(Debug, Default)]
struct Routed {
    legacy: Map<String, Value>,
    custom: Vec<(String, CustomCandidate)>,
}

/// The relay core: configuration plus an outbound HTTP client.
#[derive(Clone)]
pub struct Relay {
    config: Arc<RelayConfig>,
    forwarder: Arc<dyn Forwarder>,
}

impl Relay {
    pub fn new(config: RelayConfig, forwarder: Arc<dyn Forwarder>) -> Self {
        Self {
            config: Arc::new(config),
            forwarder,
        }
    }

    /// Parse a raw request body and relay it.
    pub async fn handle_body(&self, body: &[u8]) -> Result<ForwardOutcome, InvalidPayload> {
        let report = GatewayReport::from_slice(body).inspect_err(|e| warn!("{e}"))?;
        Ok(self.handle(&report).await)
    }

    /// Relay one parsed report.
    pub async fn handle(&self, report: &GatewayReport) -> ForwardOutcome {
        let routed = self.route(report);
        debug!(
            gw_mac = report.gw_mac.as_deref().unwrap_or("-"),
            tags = report.tags.len(),
            legacy = routed.legacy.len(),
            custom = routed.custom.len(),
            "routed gateway report"
        );

        let ruuvi_forwarded = self.forward_legacy(report, routed.legacy).await;
        let custom_forwarded = self.forward_custom(report, routed.custom).await;

        ForwardOutcome {
            ruuvi_forwarded,
            custom_forwarded,
        }
    }

    fn route(&self, report: &GatewayReport) -> Routed {
        let allowlists = &self.config.allowlists;
        let mut routed = Routed::default();

        for (mac, tag) in &report.tags {
            match classify(tag) {
                Classification::Legacy(object) => {
                    if allowlists.authorize(DeviceClass::Legacy, mac) {
                        routed.legacy.insert(mac.clone(), Value::Object(object));
                    } else {
                        info!(mac = %mac, "ignoring legacy tag not in allow-list");
                    }
                }
                Classification::Custom(candidate) => {
                    if allowlists.authorize(DeviceClass::Custom, mac) {
                        routed.custom.push((mac.clone(), candidate));
                    } else {
                        info!(mac = %mac, "ignoring custom tag not in allow-list");
                    }
                }
                Classification::Discard(reason) => {
                    debug!(mac = %mac, %reason, "discarding tag");
                }
            }
        }

        routed
    }

    async fn forward_legacy(&self, report: &GatewayReport, tags: Map<String, Value>) -> usize {
        if tags.is_empty() {
            return 0;
        }
        let Some(url) = self.config.ruuvi_destination() else {
            debug!(count = tags.len(), "ruuvi endpoint not configured, skipping batch");
            return 0;
        };

        let count = tags.len();
        let batch = legacy_batch(report, tags);
        match forward_json(
            self.forwarder.as_ref(),
            url,
            &batch,
            self.config.forward_timeout,
        )
        .await
        {
            Ok(_) => {
                info!(count, "forwarded ruuvi batch");
                count
            }
            Err(e) => {
                warn!(count, error = %e, "failed to forward ruuvi batch");
                0
            }
        }
    }

    async fn forward_custom(
        &self,
        report: &GatewayReport,
        devices: Vec<(String, CustomCandidate)>,
    ) -> usize {
        if devices.is_empty() {
            return 0;
        }
        let Some(url) = self.config.custom_destination() else {
            debug!(count = devices.len(), "custom endpoint not configured, skipping");
            return 0;
        };

        let gw_mac = report.gw_mac.as_deref();
        let forwarder = self.forwarder.as_ref();
        let timeout = self.config.forward_timeout;

        futures::stream::iter(devices)
            .map(|(mac, candidate)| async move {
                let document = CustomDocument::new(&mac, &candidate, gw_mac, report.timestamp);
                let body = match serde_json::to_value(&document) {
                    Ok(body) => body,
                    Err(e) => {
                        warn!(mac = %mac, error = %e, "failed to serialize custom document");
                        return false;
                    }
                };

                match forward_json(forwarder, url, &body, timeout).await {
                    Ok(_) => {
                        debug!(mac = %mac, "forwarded custom reading");
                        true
                    }
                    Err(e) => {
                        warn!(mac = %mac, error = %e, "failed to forward custom reading");
                        false
                    }
                }
            })
            .buffer_unordered(self.config.custom_concurrency.max(1))
            .fold(0, |forwarded, ok| async move { forwarded + usize::from(ok) })
            .await
    }
}
