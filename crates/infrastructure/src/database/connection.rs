use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{info, warn};

/// Open the database, retrying while it is still starting up.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(false);

    let attempts = config.connect_retries.max(1);

    for attempt in 1..=attempts {
        match Database::connect(options.clone()).await {
            Ok(db) => {
                info!(attempt, "Database connection established");
                return Ok(db);
            }
            Err(e) if attempt < attempts => {
                warn!("Database not ready yet ({}/{}): {}", attempt, attempts, e);
                tokio::time::sleep(Duration::from_millis(config.retry_delay_ms)).await;
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Database not ready after {} attempts", attempts));
            }
        }
    }

    anyhow::bail!("Database connection was never attempted")
}
