use json_ingest::{cli_service::CliService, config::AppConfig};
use tracing::{info, debug, error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("json_ingest=debug".parse()?)
            .add_directive("mongodb=info".parse()?))
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Starting JSON ingestion");

    let config = AppConfig::load().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;
    debug!("Input file: {}", config.file_path.display());

    let service = CliService::new(&config).await?;
    let report = service.run().await.map_err(|e| {
        error!("Ingestion failed: {}", e);
        e
    })?;

    info!("Done: inserted {} ({} bytes, {:.2} RU)",
        report.receipt.inserted_id, report.receipt.bytes_read, report.statistics.request_charge);
    Ok(())
}
