//! PostgreSQL implementation of WatchlistRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use stockbot_core::entities::{WatchlistEntry, DEFAULT_EXCHANGE};
use stockbot_core::traits::{RepoResult, WatchlistRepository};

use crate::models::WatchlistEntryModel;

use super::error::map_db_error;

/// PostgreSQL implementation of WatchlistRepository
#[derive(Clone)]
pub struct PgWatchlistRepository {
    pool: PgPool,
}

impl PgWatchlistRepository {
    /// Create a new PgWatchlistRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WatchlistRepository for PgWatchlistRepository {
    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: i64) -> RepoResult<Vec<WatchlistEntry>> {
        let rows = sqlx::query_as::<_, WatchlistEntryModel>(
            r"
            SELECT id, user_id, stock_code, exchange, alias_name, created_at
            FROM user_stocks
            WHERE user_id = $1
            ORDER BY id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(WatchlistEntry::from).collect())
    }

    #[instrument(skip(self))]
    async fn add(&self, user_id: i64, stock_code: &str) -> RepoResult<bool> {
        // Duplicates are detected by the unique (user_id, stock_code) constraint
        let result = sqlx::query(
            r"
            INSERT INTO user_stocks (user_id, stock_code, exchange, created_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id, stock_code) DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(stock_code)
        .bind(DEFAULT_EXCHANGE)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn remove(&self, user_id: i64, stock_code: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM user_stocks
            WHERE user_id = $1 AND stock_code = $2
            ",
        )
        .bind(user_id)
        .bind(stock_code)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
