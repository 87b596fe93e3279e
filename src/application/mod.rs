pub mod ingestion_service;
pub mod stats_reporter;
