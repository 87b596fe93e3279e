use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use crate::domain::error::IngestionError;

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "testDB";
pub const DEFAULT_COLLECTION: &str = "testCollection";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Everything the run needs, resolved once in `main` and passed down.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub database: String,
    pub collection: String,
    pub file_path: PathBuf,
    pub connect_timeout: Duration,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Result<Self, IngestionError> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(e) => warn!("No .env file loaded ({}), using process environment", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, IngestionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongodb_uri = lookup("MONGODB_URI").unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string());
        let database = lookup("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        let collection = lookup("MONGODB_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        let file_path = lookup("FILENAME")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| IngestionError::Config("FILENAME environment variable is required".to_string()))?;

        let connect_timeout = match lookup("CONNECT_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    IngestionError::Config(format!("CONNECT_TIMEOUT_SECS must be a whole number of seconds, got '{}'", raw))
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        debug!("Resolved config - database: {}, collection: {}, file: {}, connect timeout: {:?}",
            database, collection, file_path.display(), connect_timeout);

        Ok(Self { mongodb_uri, database, collection, file_path, connect_timeout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_only_filename_set() {
        let config = AppConfig::from_lookup(lookup_from(&[("FILENAME", "doc.json")])).unwrap();
        assert_eq!(config.mongodb_uri, DEFAULT_MONGODB_URI);
        assert_eq!(config.database, "testDB");
        assert_eq!(config.collection, "testCollection");
        assert_eq!(config.file_path, PathBuf::from("doc.json"));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("FILENAME", "/data/in.json"),
            ("MONGODB_URI", "mongodb://db.example:10255/?ssl=true"),
            ("MONGODB_DATABASE", "orders"),
            ("MONGODB_COLLECTION", "raw"),
            ("CONNECT_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.mongodb_uri, "mongodb://db.example:10255/?ssl=true");
        assert_eq!(config.database, "orders");
        assert_eq!(config.collection, "raw");
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_missing_filename_is_config_error() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, IngestionError::Config(_)));

        let err = AppConfig::from_lookup(lookup_from(&[("FILENAME", "  ")])).unwrap_err();
        assert!(matches!(err, IngestionError::Config(_)));
    }

    #[test]
    fn test_bad_timeout_is_config_error() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("FILENAME", "doc.json"),
            ("CONNECT_TIMEOUT_SECS", "ten"),
        ]))
        .unwrap_err();
        assert!(matches!(err, IngestionError::Config(msg) if msg.contains("ten")));
    }
}
