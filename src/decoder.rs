//! Decoder for the custom 19-byte sensor payload.
//!
//! Layout (little-endian):
//!
//! | offset | type | field          | scale |
//! |--------|------|----------------|-------|
//! | 0      | u8   | format version |       |
//! | 1      | i16  | temperature    | 0.01  |
//! | 3      | u16  | humidity       | 0.01  |
//! | 5      | u16  | pressure       |       |
//! | 7      | u16  | gas resistance |       |
//! | 9      | u16  | IAQ            |       |
//! | 11     | u16  | CO2            |       |
//! | 13     | u16  | VOC            | 0.01  |
//! | 15     | u16  | VOC index      |       |
//! | 17     | u16  | VOC raw        |       |

use crate::advertising::CUSTOM_PAYLOAD_LEN;
use crate::measurement::CustomReading;
use thiserror::Error;

/// Marks an unavailable unsigned field.
pub const INVALID_U16: u16 = 0xFFFF;

/// Marks an unavailable signed field (0x8000).
pub const INVALID_I16: i16 = i16::MIN;

/// Error types for decoding custom payloads.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Payload is not exactly 19 bytes
    #[error("Invalid payload length: expected 19 bytes, got {0}")]
    InvalidLength(usize),
}

/// Decode a custom payload into a [`CustomReading`].
///
/// Sentinels are checked on the raw integers before any scaling is applied.
pub fn decode_custom_payload(payload: &[u8]) -> Result<CustomReading, DecodeError> {
    if payload.len() != CUSTOM_PAYLOAD_LEN {
        return Err(DecodeError::InvalidLength(payload.len()));
    }

    let raw = |index: usize| {
        let offset = 1 + index * 2;
        [payload[offset], payload[offset + 1]]
    };
    let unsigned = |index: usize| {
        let value = u16::from_le_bytes(raw(index));
        (value != INVALID_U16).then_some(value)
    };
    let scaled = |index: usize| unsigned(index).map(|value| f64::from(value) / 100.0);

    let temperature = i16::from_le_bytes(raw(0));

    Ok(CustomReading {
        format_version: payload[0],
        temperature: (temperature != INVALID_I16).then(|| f64::from(temperature) / 100.0),
        humidity: scaled(1),
        pressure: unsigned(2),
        gas_resistance: unsigned(3),
        iaq: unsigned(4),
        co2: unsigned(5),
        voc: scaled(6),
        voc_index: unsigned(7),
        voc_raw: unsigned(8),
    })
}
