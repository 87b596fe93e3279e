use async_trait::async_trait;
use std::time::Duration;
use mongodb::{Client, bson::{doc, Document}};
use tracing::{debug, info, error};
use crate::domain::{
    error::IngestionError,
    models::{BuildInfo, RequestStatistics},
    ports::ServerAdmin,
};

/// Administrative commands against the target database.
pub struct MongoServerAdmin {
    client: Client,
    database: String,
    ping_timeout: Duration,
}

impl MongoServerAdmin {
    pub fn new(client: Client, database: String, ping_timeout: Duration) -> Self {
        debug!("Initializing MongoDB admin commands for database: {}", database);
        Self { client, database, ping_timeout }
    }

    async fn run(&self, database: &str, command: Document) -> Result<Document, IngestionError> {
        let name = command.keys().next().cloned().unwrap_or_default();
        debug!("Running command '{}' against database {}", name, database);
        self.client
            .database(database)
            .run_command(command, None)
            .await
            .map_err(|e| {
                error!("Command '{}' failed: {}", name, e);
                IngestionError::Database(e.to_string())
            })
    }
}

#[async_trait]
impl ServerAdmin for MongoServerAdmin {
    async fn ping(&self) -> Result<(), IngestionError> {
        tokio::time::timeout(self.ping_timeout, self.run("admin", doc! { "ping": 1 }))
            .await
            .map_err(|_| {
                error!("Ping did not complete within {:?}", self.ping_timeout);
                IngestionError::Timeout(self.ping_timeout)
            })??;
        info!("Connected to MongoDB, ping succeeded");
        Ok(())
    }

    async fn build_info(&self) -> Result<BuildInfo, IngestionError> {
        let reply = self.run(&self.database, doc! { "buildInfo": 1 }).await?;
        mongodb::bson::from_document(reply)
            .map_err(|e| {
                error!("Failed to decode buildInfo reply: {}", e);
                IngestionError::Decode(e.to_string())
            })
    }

    async fn last_request_stats(&self) -> Result<RequestStatistics, IngestionError> {
        let reply = self.run(&self.database, doc! { "getLastRequestStatistics": 1 }).await?;
        debug!("getLastRequestStatistics reply: {}", reply);
        mongodb::bson::from_document(reply)
            .map_err(|e| {
                error!("Failed to decode getLastRequestStatistics reply: {}", e);
                IngestionError::Decode(e.to_string())
            })
    }
}
