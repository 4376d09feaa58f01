//! PostgreSQL pool and schema migrations

use std::path::Path;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, instrument};

/// Pool sizing and timeouts
///
/// Built from [`stockbot_common::DatabaseConfig`]; the timeouts are fixed
/// because a webhook batch must finish well inside the platform's deadline.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Wait for a free connection before failing the event
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);
    const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
    const MAX_LIFETIME: Duration = Duration::from_secs(1800);

    pub fn new(url: impl Into<String>, max_connections: u32, min_connections: u32) -> Self {
        Self {
            url: url.into(),
            max_connections,
            min_connections: min_connections.min(max_connections),
            acquire_timeout: Self::ACQUIRE_TIMEOUT,
            idle_timeout: Self::IDLE_TIMEOUT,
            max_lifetime: Self::MAX_LIFETIME,
        }
    }
}

impl From<&stockbot_common::DatabaseConfig> for DatabaseConfig {
    fn from(config: &stockbot_common::DatabaseConfig) -> Self {
        Self::new(&config.url, config.max_connections, config.min_connections)
    }
}

/// Open a pool; fails fast when the database is unreachable
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .test_before_acquire(true)
        .connect(&config.url)
        .await
}

/// Apply pending migrations found in `dir`
#[instrument(skip(pool), fields(dir = %dir.display()))]
pub async fn run_migrations(pool: &PgPool, dir: &Path) -> Result<(), MigrateError> {
    let migrator = Migrator::new(dir).await?;
    info!(count = migrator.iter().count(), "Applying migrations");
    migrator.run(pool).await
}
