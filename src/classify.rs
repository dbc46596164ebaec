//! Per-device classification of gateway tags.

use crate::advertising::find_custom_payload;
use crate::decoder::{DecodeError, decode_custom_payload};
use crate::measurement::CustomReading;
use crate::report::Tag;
use serde_json::{Map, Value};
use std::fmt;

/// A tag carrying a decoded custom payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomCandidate {
    /// The advertising data hex string as received
    pub raw: String,
    pub reading: CustomReading,
    /// The tag's own timestamp, if it reported one
    pub timestamp: Option<i64>,
}

/// Why a tag was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscardReason {
    /// No `dataFormat` and no usable `data`
    Unrecognized,
    /// `data` is not valid hex
    InvalidHex(String),
    /// No custom AD structure in the advertising data
    PayloadNotFound,
    /// Custom structure found but the payload could not be decoded
    MalformedPayload(DecodeError),
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardReason::Unrecognized => write!(f, "unrecognized tag format"),
            DiscardReason::InvalidHex(e) => write!(f, "invalid hex data: {e}"),
            DiscardReason::PayloadNotFound => write!(f, "no custom payload in advertising data"),
            DiscardReason::MalformedPayload(e) => write!(f, "malformed custom payload: {e}"),
        }
    }
}

/// The path a tag takes through the relay.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Legacy(Map<String, Value>),
    Custom(CustomCandidate),
    Discard(DiscardReason),
}

/// Classify one tag. Allow-lists are applied afterwards.
pub fn classify(tag: &Tag) -> Classification {
    match tag {
        Tag::Legacy(object) => Classification::Legacy(object.clone()),
        Tag::Raw { data, timestamp } => match decode_raw(data) {
            Ok(reading) => Classification::Custom(CustomCandidate {
                raw: data.clone(),
                reading,
                timestamp: *timestamp,
            }),
            Err(reason) => Classification::Discard(reason),
        },
        Tag::Unrecognized => Classification::Discard(DiscardReason::Unrecognized),
    }
}

fn decode_raw(data: &str) -> Result<CustomReading, DiscardReason> {
    let bytes = hex::decode(data).map_err(|e| DiscardReason::InvalidHex(e.to_string()))?;
    let payload = find_custom_payload(&bytes).ok_or(DiscardReason::PayloadNotFound)?;
    decode_custom_payload(payload).map_err(DiscardReason::MalformedPayload)
}
