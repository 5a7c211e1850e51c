use std::time::Duration;

use bson::doc;
use mongodb::{options::ClientOptions, Client, Database};

use crate::{config::Config, error::AppError};

const DATABASE_TIMEOUT: Duration = Duration::from_secs(10);

/// Connects to MongoDB and verifies the connection with a ping.
///
/// Connection and server-selection timeouts are bound here, at the client
/// boundary; individual operations inherit them rather than carrying their
/// own deadlines.
///
/// # Arguments
/// - `config` - Application configuration containing the MongoDB URI and
///   database name
///
/// # Returns
/// - `Ok(Database)` - Connected and pinged database handle
/// - `Err(AppError)` - Failed to parse the URI, connect, or ping
pub async fn connect_to_database(config: &Config) -> Result<Database, AppError> {
    let mut options = ClientOptions::parse(&config.mongodb_uri).await?;
    options.connect_timeout = Some(DATABASE_TIMEOUT);
    options.server_selection_timeout = Some(DATABASE_TIMEOUT);

    let client = Client::with_options(options)?;
    let db = client.database(&config.database_name);

    db.run_command(doc! { "ping": 1 }).await?;

    tracing::info!("Connected to MongoDB database '{}'", config.database_name);

    Ok(db)
}

/// Builds the HTTP client used for outbound TimeZoneDB requests.
///
/// Redirects are disabled and a request timeout is set so a slow upstream
/// cannot hold a request open indefinitely.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(10))
        .build()?;

    Ok(client)
}
