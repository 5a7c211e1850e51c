use crate::error::{config::ConfigError, AppError};

const DEFAULT_DATABASE_NAME: &str = "skyplanner";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_PORT: u16 = 8080;

pub struct Config {
    pub mongodb_uri: String,
    pub database_name: String,

    pub jwt_secret: String,
    pub frontend_url: String,
    pub port: u16,

    /// TimeZoneDB API key. When unset, timezone lookups always fall back to UTC.
    pub timezonedb_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            mongodb_uri: std::env::var("MONGODB_URI")
                .map_err(|_| ConfigError::MissingEnvVar("MONGODB_URI".to_string()))?,
            database_name: std::env::var("MONGODB_DB")
                .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string()),
            jwt_secret: std::env::var("JWT_SECRET")
                .map_err(|_| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?,
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
            port: match std::env::var("PORT") {
                Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidEnvVar {
                    name: "PORT".to_string(),
                    reason: format!("'{raw}' is not a valid port number"),
                })?,
                Err(_) => DEFAULT_PORT,
            },
            timezonedb_api_key: std::env::var("TIMEZONEDB_API_KEY").ok(),
        })
    }
}
