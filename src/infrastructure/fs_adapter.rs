use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info};
use crate::domain::{error::IngestionError, ports::DocumentSource};

/// Reads input documents from the local filesystem.
#[derive(Debug, Default)]
pub struct LocalFileSource;

impl LocalFileSource {
    pub fn new() -> Self {
        Self
    }
}

fn io_error(path: &Path, source: std::io::Error) -> IngestionError {
    IngestionError::Io { path: path.to_path_buf(), source }
}

#[async_trait]
impl DocumentSource for LocalFileSource {
    async fn file_size(&self, path: &Path) -> Result<u64, IngestionError> {
        debug!("Reading metadata for {}", path.display());
        let metadata = tokio::fs::metadata(path).await
            .map_err(|e| {
                debug!("Failed to stat {}: {}", path.display(), e);
                io_error(path, e)
            })?;
        Ok(metadata.len())
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, IngestionError> {
        let bytes = tokio::fs::read(path).await
            .map_err(|e| {
                debug!("Failed to open {}: {}", path.display(), e);
                io_error(path, e)
            })?;
        info!("{} opened successfully", path.display());
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(bytes)
    }
}
