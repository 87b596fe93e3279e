use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Parse(String),

    #[error("expected a JSON object at top level, found {0}")]
    NotAnObject(&'static str),

    #[error("database error: {0}")]
    Database(String),

    #[error("failed to decode server reply: {0}")]
    Decode(String),

    #[error("timed out after {0:?} waiting for the server")]
    Timeout(std::time::Duration),
}
