//! Device allow-lists.
//!
//! Legacy Ruuvi tags and custom sensors are authorized against separate lists.
//! Matching is exact and case-sensitive: MACs are compared as the gateway
//! reports them.

use std::collections::HashSet;

/// The two device classes the relay routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// Tags the gateway already decoded (`dataFormat` present)
    Legacy,
    /// Tags carrying the custom advertising payload
    Custom,
}

/// An immutable set of allowed MAC addresses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Allowlist(HashSet<String>);

impl Allowlist {
    pub fn contains(&self, mac: &str) -> bool {
        self.0.contains(mac)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Allowlist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Allowlist(iter.into_iter().map(Into::into).collect())
    }
}

/// Allow-lists for both device classes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Allowlists {
    pub legacy: Allowlist,
    pub custom: Allowlist,
}

impl Allowlists {
    /// Returns `true` if `mac` is on the list for `class`.
    pub fn authorize(&self, class: DeviceClass, mac: &str) -> bool {
        match class {
            DeviceClass::Legacy => self.legacy.contains(mac),
            DeviceClass::Custom => self.custom.contains(mac),
        }
    }
}

/// Build an allow-list from configuration entries.
///
/// Whitespace around entries is trimmed and empty entries are skipped; the
/// addresses themselves are kept as written.
///
/// # Example
/// ```
/// use ruuvi_relay::allowlist::from_entries;
///
/// let list = from_entries(&[" AA:BB:CC:DD:EE:FF".to_string(), String::new()]);
/// assert_eq!(list.len(), 1);
/// assert!(list.contains("AA:BB:CC:DD:EE:FF"));
/// ```
pub fn from_entries(entries: &[String]) -> Allowlist {
    entries
        .iter()
        .map(|mac| mac.trim())
        .filter(|mac| !mac.is_empty())
        .collect()
}
