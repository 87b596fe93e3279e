use std::sync::Arc;
use tracing::{info, error, warn};
use crate::domain::{error::IngestionError, models::RequestStatistics, ports::ServerAdmin};

/// Fetches and logs the server's accounting for the previous command.
pub struct StatsReporter {
    admin: Arc<dyn ServerAdmin>,
}

impl StatsReporter {
    pub fn new(admin: Arc<dyn ServerAdmin>) -> Self {
        Self { admin }
    }

    pub async fn last_request_stats(&self) -> Result<RequestStatistics, IngestionError> {
        let stats = self.admin.last_request_stats().await
            .map_err(|e| {
                error!("Failed to retrieve last request statistics: {}", e);
                e
            })?;

        if !stats.succeeded() {
            warn!("Last request statistics report ok={} for command '{}'", stats.ok, stats.command_name);
        }
        if stats.retried_due_to_rate_limiting {
            warn!("Command '{}' was retried due to rate limiting (estimated delay {}ms)",
                stats.command_name, stats.estimated_delay_from_rate_limiting_ms);
        }
        Ok(stats)
    }

    /// Retrieves the statistics and logs their summary line.
    pub async fn report(&self) -> Result<RequestStatistics, IngestionError> {
        let stats = self.last_request_stats().await?;
        info!("{}", stats.summary());
        Ok(stats)
    }
}
