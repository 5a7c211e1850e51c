use super::*;
use chrono::TimeZone;

fn sample(zone_name: &str) -> TimezoneDto {
    TimezoneDto {
        status: "OK".to_string(),
        zone_name: zone_name.to_string(),
        abbreviation: "EST".to_string(),
        gmt_offset: -18000,
        ..TimezoneDto::default()
    }
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Tests that coordinates are rounded to two decimal places when forming the
/// cache key, so lookups within the same ~1.1 km grid cell share one entry.
///
/// Expected: Identical keys for nearby coordinates
#[test]
fn nearby_coordinates_share_a_key() {
    assert_eq!(
        TimezoneCache::key(40.7128, -74.0060),
        TimezoneCache::key(40.7129, -74.0061),
    );
    assert_eq!(TimezoneCache::key(40.7128, -74.0060), "40.71:-74.01");
}

/// Tests that the key keeps full grid resolution: coordinates in different
/// cells must not collide.
///
/// Expected: Distinct keys
#[test]
fn distant_coordinates_get_distinct_keys() {
    assert_ne!(
        TimezoneCache::key(40.7128, -74.0060),
        TimezoneCache::key(40.7228, -74.0060),
    );
}

/// Tests that an inserted entry is served back while it is younger than the
/// TTL.
///
/// Expected: Some with the cached data
#[tokio::test]
async fn serves_fresh_entry() {
    let cache = TimezoneCache::new();
    let now = fixed_now();

    cache
        .insert("40.71:-74.01".to_string(), sample("America/New_York"), now)
        .await;

    let hit = cache
        .get("40.71:-74.01", now + Duration::hours(23))
        .await
        .unwrap();

    assert_eq!(hit.zone_name, "America/New_York");
}

/// Tests that an entry older than 24 hours is treated as a miss.
///
/// Expected: None at and beyond the TTL boundary
#[tokio::test]
async fn expires_entry_after_24_hours() {
    let cache = TimezoneCache::new();
    let now = fixed_now();

    cache
        .insert("40.71:-74.01".to_string(), sample("America/New_York"), now)
        .await;

    assert!(cache
        .get("40.71:-74.01", now + Duration::hours(24))
        .await
        .is_none());
    assert!(cache
        .get("40.71:-74.01", now + Duration::hours(25))
        .await
        .is_none());
}

/// Tests that inserting again for the same key replaces the stale entry.
///
/// Expected: The newest data wins
#[tokio::test]
async fn insert_overwrites_existing_entry() {
    let cache = TimezoneCache::new();
    let now = fixed_now();

    cache
        .insert("40.71:-74.01".to_string(), sample("America/New_York"), now)
        .await;
    cache
        .insert(
            "40.71:-74.01".to_string(),
            sample("America/Detroit"),
            now + Duration::hours(30),
        )
        .await;

    let hit = cache
        .get("40.71:-74.01", now + Duration::hours(31))
        .await
        .unwrap();

    assert_eq!(hit.zone_name, "America/Detroit");
}

/// Tests that a lookup for a key that was never inserted misses.
///
/// Expected: None
#[tokio::test]
async fn misses_unknown_key() {
    let cache = TimezoneCache::new();

    assert!(cache.get("40.71:-74.01", fixed_now()).await.is_none());
}

/// Tests the shape of the UTC fallback served when the upstream lookup fails.
///
/// Expected: OK status, UTC zone, zero offset, formatted current time
#[test]
fn utc_fallback_shape() {
    let fallback = TimezoneDto::utc_fallback(fixed_now());

    assert_eq!(fallback.status, "OK");
    assert_eq!(fallback.zone_name, "UTC");
    assert_eq!(fallback.abbreviation, "UTC");
    assert_eq!(fallback.gmt_offset, 0);
    assert_eq!(fallback.formatted, "2025-06-01 12:00:00");
}
