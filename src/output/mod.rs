//! Outgoing documents for the two ingestion endpoints.
//!
//! Legacy Ruuvi tags are re-sent in the gateway's own batch format so the
//! downstream Ruuvi ingester does not need to know about the relay. Custom
//! sensors get one flat document per device.

pub mod custom;
pub mod legacy;

pub use custom::CustomDocument;
pub use legacy::legacy_batch;
