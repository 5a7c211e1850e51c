//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each
//! request handler through Axum's state extraction. All fields are cheap to
//! clone: `Database` and `reqwest::Client` share their pools internally, the
//! timezone cache is reference-counted, and the remaining fields are small
//! strings.

use std::sync::Arc;

use mongodb::Database;

use crate::service::timezone::TimezoneCache;

#[derive(Clone)]
pub struct AppState {
    /// Handle to the MongoDB database holding the users, flights, and
    /// missions collections.
    pub db: Database,

    /// HTTP client for the TimeZoneDB upstream. Configured with no redirects
    /// and a request timeout at startup.
    pub http_client: reqwest::Client,

    /// Shared coordinate→timezone cache, the only mutable state in the
    /// process.
    pub timezone_cache: Arc<TimezoneCache>,

    /// Secret used to sign and verify access tokens.
    pub jwt_secret: String,

    /// TimeZoneDB API key; `None` means every lookup falls back to UTC.
    pub timezonedb_api_key: Option<String>,
}

impl AppState {
    pub fn new(
        db: Database,
        http_client: reqwest::Client,
        jwt_secret: String,
        timezonedb_api_key: Option<String>,
    ) -> Self {
        Self {
            db,
            http_client,
            timezone_cache: Arc::new(TimezoneCache::new()),
            jwt_secret,
            timezonedb_api_key,
        }
    }
}
