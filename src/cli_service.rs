use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error, debug, warn};
use crate::{
    application::{ingestion_service::IngestionService, stats_reporter::StatsReporter},
    config::AppConfig,
    domain::{error::IngestionError, models::RunReport, ports::ServerAdmin},
    infrastructure::{
        fs_adapter::LocalFileSource,
        parsers::JsonParser,
        mongodb::{admin_repo::MongoServerAdmin, connection, data_repo::MongoDataRepository},
    },
};

// Server selection gives up at the connect timeout; the outer ping bound only
// catches a hang past that.
const PING_GRACE: Duration = Duration::from_secs(1);

/// One-shot run: ping, report version, ingest the file, report its cost.
pub struct CliService {
    admin: Arc<dyn ServerAdmin>,
    ingestion: IngestionService,
    reporter: StatsReporter,
    file_path: PathBuf,
}

impl CliService {
    pub async fn new(config: &AppConfig) -> Result<Self, IngestionError> {
        debug!("Initializing CLI service");
        info!("MongoDB database: {}, collection: {}", config.database, config.collection);

        let mongo_client = connection::connect(&config.mongodb_uri, config.connect_timeout).await
            .map_err(|e| {
                error!("Failed to connect to MongoDB: {}", e);
                e
            })?;

        let admin: Arc<dyn ServerAdmin> = Arc::new(MongoServerAdmin::new(
            mongo_client.clone(),
            config.database.clone(),
            config.connect_timeout + PING_GRACE,
        ));
        let data_repo = Arc::new(MongoDataRepository::new(mongo_client, config.database.clone()));
        let ingestion = IngestionService::new(
            Arc::new(LocalFileSource::new()),
            Arc::new(JsonParser::new()),
            data_repo,
            config.collection.clone(),
        );
        debug!("MongoDB repositories initialized");

        Ok(Self::from_components(admin, ingestion, config.file_path.clone()))
    }

    pub fn from_components(admin: Arc<dyn ServerAdmin>, ingestion: IngestionService, file_path: PathBuf) -> Self {
        let reporter = StatsReporter::new(admin.clone());
        Self { admin, ingestion, reporter, file_path }
    }

    pub async fn run(&self) -> Result<RunReport, IngestionError> {
        self.admin.ping().await
            .map_err(|e| {
                error!("MongoDB ping failed: {}", e);
                e
            })?;

        let server_version = match self.admin.build_info().await {
            Ok(info) => info.version,
            Err(e) => {
                warn!("Failed to run buildInfo command: {}", e);
                "unknown".to_string()
            }
        };
        info!("Database version: {}", server_version);

        let receipt = self.ingestion.ingest(&self.file_path).await?;
        let statistics = self.reporter.report().await?;

        debug!("Run complete");
        Ok(RunReport { server_version, receipt, statistics })
    }
}
