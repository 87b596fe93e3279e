use std::time::Duration;
use mongodb::{Client, options::ClientOptions};
use tracing::{debug, info, error};
use crate::domain::error::IngestionError;

/// Builds a client bound to a single pooled connection.
///
/// `getLastRequestStatistics` reports on the previous command of the
/// connection it arrives on, so the insert and the statistics query must
/// share one.
pub async fn connect(uri: &str, connect_timeout: Duration) -> Result<Client, IngestionError> {
    debug!("Parsing MongoDB connection string");
    let mut options = ClientOptions::parse(uri).await
        .map_err(|e| {
            error!("Invalid MongoDB connection string: {}", e);
            IngestionError::Config(e.to_string())
        })?;

    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.connect_timeout = Some(connect_timeout);
    options.server_selection_timeout = Some(connect_timeout);
    options.max_pool_size = Some(1);
    options.min_pool_size = None;

    let client = Client::with_options(options)
        .map_err(|e| {
            error!("Failed to create MongoDB client: {}", e);
            IngestionError::Database(e.to_string())
        })?;

    info!("MongoDB client created (connect timeout {:?})", connect_timeout);
    Ok(client)
}
