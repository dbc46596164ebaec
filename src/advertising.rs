//! BLE advertising data scanning.
//!
//! Advertising data is a sequence of AD structures, each laid out as
//! `[length, ad_type, value...]` where `length` counts the type byte and the
//! value. The custom sensor firmware embeds its payload either as
//! manufacturer-specific data or as 16-bit service data, both tagged with the
//! reserved identifier `0xFFFF`.

/// AD type for manufacturer-specific data.
pub const AD_TYPE_MANUFACTURER_DATA: u8 = 0xFF;

/// AD type for 16-bit UUID service data.
pub const AD_TYPE_SERVICE_DATA_16: u8 = 0x16;

/// Company identifier used by the custom firmware (0xFFFF is reserved for testing).
pub const CUSTOM_COMPANY_ID: u16 = 0xFFFF;

/// 16-bit service UUID used by the custom firmware.
pub const CUSTOM_SERVICE_UUID: u16 = 0xFFFF;

/// Length of the custom payload in bytes.
pub const CUSTOM_PAYLOAD_LEN: usize = 19;

/// Type byte plus the 2-byte identifier.
const AD_HEADER_LEN: usize = 3;

/// Find the custom sensor payload inside raw advertising data.
///
/// Returns the 19 payload bytes of the first matching AD structure. A zero
/// length or a structure running past the end of `ad_data` ends the scan, so
/// truncated input yields `None` rather than a partial payload.
///
/// # Example
/// ```
/// use ruuvi_relay::advertising::find_custom_payload;
///
/// let mut ad = vec![0x02, 0x01, 0x06, 22, 0xFF, 0xFF, 0xFF];
/// ad.extend_from_slice(&[0u8; 19]);
/// assert_eq!(find_custom_payload(&ad).map(<[u8]>::len), Some(19));
/// assert!(find_custom_payload(&[0x02, 0x01]).is_none());
/// ```
pub fn find_custom_payload(ad_data: &[u8]) -> Option<&[u8]> {
    let mut offset = 0;
    while offset + 2 <= ad_data.len() {
        let len = ad_data[offset] as usize;
        if len == 0 || offset + 1 + len > ad_data.len() {
            break;
        }

        let ad_type = ad_data[offset + 1];
        let expected_id = match ad_type {
            AD_TYPE_MANUFACTURER_DATA => Some(CUSTOM_COMPANY_ID),
            AD_TYPE_SERVICE_DATA_16 => Some(CUSTOM_SERVICE_UUID),
            _ => None,
        };

        if let Some(expected_id) = expected_id
            && len >= AD_HEADER_LEN
        {
            // Identifier is little-endian, like the Ruuvi manufacturer ID
            let id = u16::from_le_bytes([ad_data[offset + 2], ad_data[offset + 3]]);
            if id == expected_id && len >= AD_HEADER_LEN + CUSTOM_PAYLOAD_LEN {
                let start = offset + 1 + AD_HEADER_LEN;
                return Some(&ad_data[start..start + CUSTOM_PAYLOAD_LEN]);
            }
        }

        offset += 1 + len;
    }

    None
}
