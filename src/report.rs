//! Gateway report model.
//!
//! A Ruuvi Gateway posts JSON of the form
//!
//! ```json
//! {"data": {"coordinates": "", "timestamp": 1700000000, "nonce": 1,
//!           "gw_mac": "11:22:33:44:55:66",
//!           "tags": {"AA:BB:CC:DD:EE:FF": {"dataFormat": 5, ...}}}}
//! ```
//!
//! Tags are classified by shape only. Legacy tags are kept as the original
//! JSON object so they can be forwarded unchanged.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// The request body is not a gateway report envelope.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidPayload {
    #[error("invalid payload: body is not valid JSON: {0}")]
    Json(String),
    #[error("invalid payload: missing or non-object 'data' field")]
    MissingData,
}

/// One device entry under `tags`.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// Already decoded by the gateway (has `dataFormat`); forwarded verbatim.
    Legacy(Map<String, Value>),
    /// Raw advertising data as a hex string.
    Raw {
        data: String,
        timestamp: Option<i64>,
    },
    /// Neither shape.
    Unrecognized,
}

impl Tag {
    /// Classify a tag by structure: `dataFormat` wins over `data`.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Tag::Unrecognized;
        };

        if object.contains_key("dataFormat") {
            return Tag::Legacy(object.clone());
        }

        match object.get("data").and_then(Value::as_str) {
            Some(data) if !data.is_empty() => Tag::Raw {
                data: data.to_string(),
                timestamp: object.get("timestamp").and_then(parse_timestamp),
            },
            _ => Tag::Unrecognized,
        }
    }
}

/// A parsed gateway report.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GatewayReport {
    pub gw_mac: Option<String>,
    /// Epoch seconds; `None` when missing or unparseable
    pub timestamp: Option<i64>,
    pub nonce: Option<Value>,
    pub coordinates: Option<Value>,
    pub tags: BTreeMap<String, Tag>,
}

impl GatewayReport {
    /// Parse a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, InvalidPayload> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| InvalidPayload::Json(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Parse a request body that has already been read as JSON.
    pub fn from_value(body: &Value) -> Result<Self, InvalidPayload> {
        let data = body
            .get("data")
            .and_then(Value::as_object)
            .ok_or(InvalidPayload::MissingData)?;

        let tags = data
            .get("tags")
            .and_then(Value::as_object)
            .map(|tags| {
                tags.iter()
                    .map(|(mac, tag)| (mac.clone(), Tag::from_value(tag)))
                    .collect()
            })
            .unwrap_or_default();

        Ok(GatewayReport {
            gw_mac: data.get("gw_mac").and_then(Value::as_str).map(String::from),
            timestamp: data.get("timestamp").and_then(parse_timestamp),
            nonce: data.get("nonce").cloned(),
            coordinates: data.get("coordinates").cloned(),
            tags,
        })
    }
}

/// Accept integer or numeric-string epoch seconds.
fn parse_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RawFields, TEST_GW_MAC, TEST_MAC, gateway_body, legacy_tag, raw_tag};
    use serde_json::json;

    #[test]
    fn test_parse_envelope() {
        let body = gateway_body(json!({ TEST_MAC: legacy_tag() }));
        let report = GatewayReport::from_value(&body).unwrap();

        assert_eq!(report.gw_mac.as_deref(), Some(TEST_GW_MAC));
        assert_eq!(report.timestamp, Some(1_700_000_123));
        assert_eq!(report.nonce, Some(json!(42)));
        assert_eq!(report.coordinates, Some(json!("")));
        assert!(matches!(report.tags.get(TEST_MAC), Some(Tag::Legacy(_))));
    }

    #[test]
    fn test_string_timestamp() {
        let body = json!({"data": {"timestamp": "1700000000", "tags": {}}});
        let report = GatewayReport::from_value(&body).unwrap();
        assert_eq!(report.timestamp, Some(1_700_000_000));
    }

    #[test]
    fn test_unparseable_timestamp_is_absent() {
        let body = json!({"data": {"timestamp": "yesterday", "tags": {}}});
        let report = GatewayReport::from_value(&body).unwrap();
        assert_eq!(report.timestamp, None);
    }

    #[test]
    fn test_missing_tags_is_empty() {
        let report = GatewayReport::from_value(&json!({"data": {}})).unwrap();
        assert!(report.tags.is_empty());
        assert_eq!(report.gw_mac, None);
    }

    #[test]
    fn test_missing_data_is_invalid() {
        assert_eq!(
            GatewayReport::from_value(&json!({"tags": {}})),
            Err(InvalidPayload::MissingData)
        );
        assert_eq!(
            GatewayReport::from_value(&json!({"data": "nope"})),
            Err(InvalidPayload::MissingData)
        );
        assert_eq!(
            GatewayReport::from_value(&json!([1, 2, 3])),
            Err(InvalidPayload::MissingData)
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            GatewayReport::from_slice(b"{not json"),
            Err(InvalidPayload::Json(_))
        ));
    }

    #[test]
    fn test_tag_shapes() {
        assert!(matches!(Tag::from_value(&legacy_tag()), Tag::Legacy(_)));

        match Tag::from_value(&raw_tag(&RawFields::default())) {
            Tag::Raw { data, timestamp } => {
                assert!(!data.is_empty());
                assert_eq!(timestamp, Some(1_700_000_100));
            }
            other => panic!("expected raw tag, got {other:?}"),
        }

        assert_eq!(Tag::from_value(&json!({"data": ""})), Tag::Unrecognized);
        assert_eq!(Tag::from_value(&json!({"data": 12})), Tag::Unrecognized);
        assert_eq!(Tag::from_value(&json!({"rssi": -50})), Tag::Unrecognized);
        assert_eq!(Tag::from_value(&json!("0201")), Tag::Unrecognized);
    }

    #[test]
    fn test_data_format_wins_over_data() {
        let tag = json!({"dataFormat": 5, "data": "0201060303AAFE"});
        match Tag::from_value(&tag) {
            Tag::Legacy(object) => assert_eq!(Value::Object(object), tag),
            other => panic!("expected legacy tag, got {other:?}"),
        }
    }
}
