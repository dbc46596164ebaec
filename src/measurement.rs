//! Custom sensor reading data structure.

use serde::Serialize;

/// A reading decoded from the custom 19-byte advertising payload.
///
/// Every sensor field is optional: the firmware reports a sentinel when a
/// sensor is missing or has not produced a value yet. Values are scaled:
/// - Temperature in Celsius
/// - Humidity in percent (0-100)
/// - VOC in the firmware's 0.01 units
/// - Everything else is the raw integer sensor value
///
/// Serialized field names are the ones the ingestion endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomReading {
    /// Payload format version
    #[serde(rename = "formatVersion")]
    pub format_version: u8,
    /// Temperature in Celsius
    pub temperature: Option<f64>,
    /// Relative humidity in percent (0-100)
    pub humidity: Option<f64>,
    /// Atmospheric pressure, raw units
    pub pressure: Option<u16>,
    /// Gas sensor resistance
    pub gas_resistance: Option<u16>,
    /// Indoor air quality index
    pub iaq: Option<u16>,
    /// Carbon dioxide concentration
    pub co2: Option<u16>,
    /// Volatile organic compounds
    pub voc: Option<f64>,
    /// SGP40 VOC index
    #[serde(rename = "sgp40_voc_index")]
    pub voc_index: Option<u16>,
    /// SGP40 raw signal
    #[serde(rename = "sgp40_raw")]
    pub voc_raw: Option<u16>,
}
