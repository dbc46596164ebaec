use crate::advertising::{AD_TYPE_MANUFACTURER_DATA, CUSTOM_COMPANY_ID};
use serde_json::{Value, json};

/// A stable device MAC for unit tests.
pub const TEST_MAC: &str = "AA:BB:CC:DD:EE:FF";

/// A stable gateway MAC for unit tests.
pub const TEST_GW_MAC: &str = "11:22:33:44:55:66";

/// Raw (unscaled) custom payload fields, in wire order.
#[derive(Debug, Clone, Default)]
pub struct RawFields {
    pub format_version: u8,
    pub temperature: i16,
    pub humidity: u16,
    pub pressure: u16,
    pub gas_resistance: u16,
    pub iaq: u16,
    pub co2: u16,
    pub voc: u16,
    pub voc_index: u16,
    pub voc_raw: u16,
}

impl RawFields {
    /// Mutable access to the unsigned fields by wire position (0 = humidity).
    pub fn unsigned_mut(&mut self, index: usize) -> &mut u16 {
        match index {
            0 => &mut self.humidity,
            1 => &mut self.pressure,
            2 => &mut self.gas_resistance,
            3 => &mut self.iaq,
            4 => &mut self.co2,
            5 => &mut self.voc,
            6 => &mut self.voc_index,
            7 => &mut self.voc_raw,
            _ => panic!("no unsigned field at index {index}"),
        }
    }
}

/// Encode fields the way the sensor firmware does.
pub fn encode_custom_payload(fields: &RawFields) -> Vec<u8> {
    let mut payload = vec![fields.format_version];
    payload.extend(fields.temperature.to_le_bytes());
    for value in [
        fields.humidity,
        fields.pressure,
        fields.gas_resistance,
        fields.iaq,
        fields.co2,
        fields.voc,
        fields.voc_index,
        fields.voc_raw,
    ] {
        payload.extend(value.to_le_bytes());
    }
    payload
}

/// Build one AD structure.
pub fn ad_structure(ad_type: u8, value: &[u8]) -> Vec<u8> {
    let mut structure = vec![(value.len() + 1) as u8, ad_type];
    structure.extend_from_slice(value);
    structure
}

/// Build an AD structure carrying `payload` behind the custom identifier.
pub fn custom_frame(ad_type: u8, payload: &[u8]) -> Vec<u8> {
    let mut value = CUSTOM_COMPANY_ID.to_le_bytes().to_vec();
    value.extend_from_slice(payload);
    ad_structure(ad_type, &value)
}

/// Hex-encoded advertising data as the gateway reports it: flags followed by
/// the custom manufacturer data.
pub fn custom_tag_hex(fields: &RawFields) -> String {
    let mut ad = vec![0x02, 0x01, 0x06];
    ad.extend(custom_frame(
        AD_TYPE_MANUFACTURER_DATA,
        &encode_custom_payload(fields),
    ));
    hex::encode_upper(ad)
}

/// A legacy Ruuvi tag entry as forwarded by the gateway.
pub fn legacy_tag() -> Value {
    json!({
        "rssi": -65,
        "timestamp": 1_700_000_000,
        "data": "0201061BFF99040512FC5394C37C0004FFFC040CAC364200CDCBB8334C884F",
        "dataFormat": 5,
        "temperature": 24.3,
    })
}

/// A raw tag entry wrapping a custom payload.
pub fn raw_tag(fields: &RawFields) -> Value {
    json!({
        "rssi": -70,
        "timestamp": 1_700_000_100,
        "data": custom_tag_hex(fields),
    })
}

/// A gateway request body with the given tags.
pub fn gateway_body(tags: Value) -> Value {
    json!({
        "data": {
            "coordinates": "",
            "timestamp": 1_700_000_123,
            "nonce": 42,
            "gw_mac": TEST_GW_MAC,
            "tags": tags,
        }
    })
}
