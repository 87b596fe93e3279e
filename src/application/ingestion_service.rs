use std::path::Path;
use std::sync::Arc;
use tracing::{info, debug, error};
use crate::domain::{
    error::IngestionError,
    models::IngestReceipt,
    ports::{DocumentSource, DocumentParser, DataRepository},
};

pub struct IngestionService {
    document_source: Arc<dyn DocumentSource>,
    data_parser: Arc<dyn DocumentParser>,
    data_repo: Arc<dyn DataRepository>,
    target_collection: String,
}

impl IngestionService {
    pub fn new(
        document_source: Arc<dyn DocumentSource>,
        data_parser: Arc<dyn DocumentParser>,
        data_repo: Arc<dyn DataRepository>,
        target_collection: String,
    ) -> Self {
        Self {
            document_source,
            data_parser,
            data_repo,
            target_collection,
        }
    }

    /// Reads `path`, parses it as one JSON object and inserts it as one record.
    pub async fn ingest(&self, path: &Path) -> Result<IngestReceipt, IngestionError> {
        info!("Starting ingestion of {}", path.display());

        // Step 1: Report file size
        let file_size = self.document_source.file_size(path).await
            .map_err(|e| {
                error!("Failed to stat input file {}: {}", path.display(), e);
                e
            })?;
        info!("The JSON file size is {} bytes", file_size);

        // Step 2: Read file
        debug!("Step 2: Reading {}", path.display());
        let file_bytes = self.document_source.read_file(path).await
            .map_err(|e| {
                error!("Failed to read input file {}: {}", path.display(), e);
                e
            })?;

        // Step 3: Parse file content
        debug!("Step 3: Parsing {} bytes", file_bytes.len());
        let document = self.data_parser.parse(&file_bytes).await
            .map_err(|e| {
                error!("Failed to parse {}: {}", path.display(), e);
                e
            })?;

        // Step 4: Store document
        debug!("Step 4: Storing document in collection: {}", self.target_collection);
        let inserted_id = self.data_repo.insert_document(&self.target_collection, &document).await
            .map_err(|e| {
                error!("Failed to store document from {}: {}", path.display(), e);
                e
            })?;

        info!("Successfully inserted {} into {} as {}", path.display(), self.target_collection, inserted_id);
        Ok(IngestReceipt {
            bytes_read: file_bytes.len() as u64,
            inserted_id,
        })
    }
}
