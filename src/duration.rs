//! Human-readable durations for timeout flags.

use std::time::Duration;

/// Parse a forward timeout such as `10s`, `1500ms`, `2m` or `1h`.
///
/// A bare number is read as seconds. Zero is rejected: every outbound call
/// must have a bounded, non-zero timeout.
///
/// # Examples
/// ```
/// use ruuvi_relay::duration::parse_timeout;
/// use std::time::Duration;
///
/// assert_eq!(parse_timeout("10s").unwrap(), Duration::from_secs(10));
/// assert_eq!(parse_timeout("750ms").unwrap(), Duration::from_millis(750));
/// assert!(parse_timeout("0").is_err());
/// ```
pub fn parse_timeout(src: &str) -> Result<Duration, String> {
    let src = src.trim();
    if src.is_empty() {
        return Err("empty duration string".to_string());
    }

    // "ms" must be tried before "m" and "s"
    let (number, unit_millis) = if let Some(n) = src.strip_suffix("ms") {
        (n, 1)
    } else if let Some(n) = src.strip_suffix('h') {
        (n, 3_600_000)
    } else if let Some(n) = src.strip_suffix('m') {
        (n, 60_000)
    } else if let Some(n) = src.strip_suffix('s') {
        (n, 1_000)
    } else {
        (src, 1_000)
    };

    let value: u64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration: {src}"))?;
    if value == 0 {
        return Err("timeout must be greater than zero".to_string());
    }

    Ok(Duration::from_millis(value.saturating_mul(unit_millis)))
}
