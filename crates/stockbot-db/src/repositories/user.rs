//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use stockbot_core::entities::User;
use stockbot_core::traits::{RepoResult, UserRepository};

use crate::models::UserModel;

use super::error::map_db_error;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_line_id(&self, line_user_id: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, line_user_id, display_name, is_active, reply_count, created_at, updated_at
            FROM app_users
            WHERE line_user_id = $1
            ",
        )
        .bind(line_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn upsert_active(&self, line_user_id: &str, display_name: Option<&str>) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO app_users (line_user_id, display_name, is_active, reply_count, created_at, updated_at)
            VALUES ($1, $2, TRUE, 0, NOW(), NOW())
            ON CONFLICT (line_user_id) DO UPDATE
            SET display_name = COALESCE(EXCLUDED.display_name, app_users.display_name),
                is_active = TRUE,
                updated_at = NOW()
            RETURNING id, line_user_id, display_name, is_active, reply_count, created_at, updated_at
            ",
        )
        .bind(line_user_id)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(User::from(model))
    }

    #[instrument(skip(self))]
    async fn deactivate(&self, line_user_id: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE app_users
            SET is_active = FALSE, updated_at = NOW()
            WHERE line_user_id = $1
            ",
        )
        .bind(line_user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn increment_reply_count(&self, line_user_id: &str) -> RepoResult<Option<i32>> {
        let count = sqlx::query_scalar::<_, i32>(
            r"
            UPDATE app_users
            SET reply_count = reply_count + 1, updated_at = NOW()
            WHERE line_user_id = $1
            RETURNING reply_count
            ",
        )
        .bind(line_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
