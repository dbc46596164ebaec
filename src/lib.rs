//! `ruuvi-relay` library.
//!
//! The binary (`src/main.rs`) is responsible for logging setup and process exit codes.
//! The relay itself lives in [`crate::router::Relay`]: it classifies the tags of a
//! Ruuvi Gateway report, decodes custom advertising payloads, applies the
//! allow-lists and forwards through an injected [`forward::Forwarder`], so it can be
//! tested deterministically without a network.

pub mod advertising;
pub mod allowlist;
pub mod app;
pub mod classify;
pub mod config;
pub mod decoder;
pub mod duration;
pub mod forward;
pub mod measurement;
pub mod output;
pub mod report;
pub mod router;
pub mod server;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types at the crate root
pub use advertising::find_custom_payload;
pub use allowlist::{Allowlist, Allowlists, DeviceClass};
pub use classify::{Classification, CustomCandidate, DiscardReason, classify};
pub use config::RelayConfig;
pub use decoder::{DecodeError, decode_custom_payload};
pub use forward::{ForwardError, ForwardResponse, Forwarder, HttpForwarder};
pub use measurement::CustomReading;
pub use report::{GatewayReport, InvalidPayload, Tag};
pub use router::{ForwardOutcome, Relay};
