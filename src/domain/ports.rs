use async_trait::async_trait;
use std::path::Path;
use crate::domain::{
    error::IngestionError,
    models::{BuildInfo, IngestedDocument, RequestStatistics},
};

#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn file_size(&self, path: &Path) -> Result<u64, IngestionError>;
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, IngestionError>;
}

#[async_trait]
pub trait DocumentParser: Send + Sync {
    async fn parse(&self, file_bytes: &[u8]) -> Result<IngestedDocument, IngestionError>;
}

#[async_trait]
pub trait DataRepository: Send + Sync {
    /// Stores `document` as one new record and returns the id the server assigned.
    async fn insert_document(&self, target_collection: &str, document: &IngestedDocument) -> Result<String, IngestionError>;
}

/// Administrative commands run on the same connection as the inserts.
#[async_trait]
pub trait ServerAdmin: Send + Sync {
    async fn ping(&self) -> Result<(), IngestionError>;
    async fn build_info(&self) -> Result<BuildInfo, IngestionError>;
    async fn last_request_stats(&self) -> Result<RequestStatistics, IngestionError>;
}
