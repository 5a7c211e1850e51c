//! Coordinate→timezone lookup with a read-through cache.
//!
//! Coordinates are rounded to 2 decimal places (about a 1.1 km grid) to form
//! the cache key, so nearby lookups share one entry. Entries are valid for
//! 24 hours from insertion; expired entries are treated as misses and
//! overwritten on the next successful fetch. Upstream failures are never
//! cached and never surfaced: the caller always gets a response, falling back
//! to UTC when TimeZoneDB is unreachable or misconfigured.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::{error::AppError, model::timezone::TimezoneDto};

#[cfg(test)]
mod test;

const TIMEZONEDB_URL: &str = "http://api.timezonedb.com/v2.1/get-time-zone";

/// Cache entry time-to-live in hours.
const CACHE_TTL_HOURS: i64 = 24;

/// A cached upstream response with its insertion timestamp.
#[derive(Clone)]
struct CacheEntry {
    data: TimezoneDto,
    inserted_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.inserted_at >= Duration::hours(CACHE_TTL_HOURS)
    }
}

/// In-memory timezone cache shared across requests.
///
/// Many concurrent readers, exclusive writer on insert. There is no eviction
/// beyond expiry-on-read; stale entries are simply replaced.
#[derive(Default)]
pub struct TimezoneCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl TimezoneCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache key for a coordinate pair, rounded to the 2-decimal grid.
    pub fn key(lat: f64, lng: f64) -> String {
        format!("{lat:.2}:{lng:.2}")
    }

    /// Returns the cached response for `key` if it is younger than the TTL.
    pub async fn get(&self, key: &str, now: DateTime<Utc>) -> Option<TimezoneDto> {
        let entries = self.entries.read().await;

        entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.data.clone())
    }

    pub async fn insert(&self, key: String, data: TimezoneDto, now: DateTime<Utc>) {
        let mut entries = self.entries.write().await;

        entries.insert(
            key,
            CacheEntry {
                data,
                inserted_at: now,
            },
        );
    }
}

pub struct TimezoneService<'a> {
    http_client: &'a reqwest::Client,
    cache: &'a TimezoneCache,
    api_key: Option<&'a str>,
}

impl<'a> TimezoneService<'a> {
    pub fn new(
        http_client: &'a reqwest::Client,
        cache: &'a TimezoneCache,
        api_key: Option<&'a str>,
    ) -> Self {
        Self {
            http_client,
            cache,
            api_key,
        }
    }

    /// Looks up the timezone for a coordinate, serving from the cache when
    /// possible. Never fails: upstream errors degrade to the UTC fallback.
    pub async fn lookup(&self, lat: f64, lng: f64) -> TimezoneDto {
        let key = TimezoneCache::key(lat, lng);
        let now = Utc::now();

        if let Some(cached) = self.cache.get(&key, now).await {
            tracing::debug!("Timezone cache hit for {}", key);
            return cached;
        }

        tracing::debug!("Timezone cache miss for {}, querying TimeZoneDB", key);

        match self.fetch(lat, lng).await {
            Ok(data) => {
                self.cache.insert(key, data.clone(), now).await;
                data
            }
            Err(err) => {
                tracing::warn!("Timezone lookup failed ({err}), falling back to UTC");
                TimezoneDto::utc_fallback(now)
            }
        }
    }

    async fn fetch(&self, lat: f64, lng: f64) -> Result<TimezoneDto, AppError> {
        let api_key = self.api_key.ok_or_else(|| {
            AppError::InternalError("TIMEZONEDB_API_KEY is not configured".to_string())
        })?;

        let response = self
            .http_client
            .get(TIMEZONEDB_URL)
            .query(&[("key", api_key), ("format", "json"), ("by", "position")])
            .query(&[("lat", lat), ("lng", lng)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::InternalError(format!(
                "TimeZoneDB returned status {}",
                response.status()
            )));
        }

        let data: TimezoneDto = response.json().await?;

        if data.status != "OK" {
            return Err(AppError::InternalError(format!(
                "TimeZoneDB error: {}",
                data.message
            )));
        }

        Ok(data)
    }
}
