use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timezone lookup result, in the shape the TimeZoneDB API returns it.
///
/// The same shape is relayed to clients unchanged, so upstream responses can
/// be cached and emitted without remapping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneDto {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub zone_name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub gmt_offset: i32,
    #[serde(default)]
    pub dst: String,
    #[serde(default)]
    pub zone_start: i64,
    #[serde(default)]
    pub zone_end: i64,
    #[serde(default)]
    pub next_abbreviation: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub formatted: String,
}

impl TimezoneDto {
    /// The response served when the upstream lookup fails for any reason:
    /// availability over correctness for this path.
    pub fn utc_fallback(now: DateTime<Utc>) -> Self {
        Self {
            status: "OK".to_string(),
            zone_name: "UTC".to_string(),
            abbreviation: "UTC".to_string(),
            gmt_offset: 0,
            formatted: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            ..Self::default()
        }
    }
}
