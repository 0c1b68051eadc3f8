//! Decides whether a record name may be managed inside a zone.

use crate::core::zone::normalize_name;

/// True only when `record` is a direct child of the `zone` apex: one label deeper,
/// never the apex itself and never a grandchild.
///
/// Both names are compared case-insensitively after dropping one trailing dot, so
/// `WWW.Example.com` belongs to `example.com.`.
pub fn belongs_to_zone(record: &str, zone: &str) -> bool {
    let record = normalize_name(record);
    let zone = normalize_name(zone);

    if record == zone {
        return false;
    }

    let zone_suffix = format!(".{zone}");
    match record.strip_suffix(&zone_suffix) {
        Some(label) => !label.is_empty() && !label.contains('.'),
        None => false,
    }
}
