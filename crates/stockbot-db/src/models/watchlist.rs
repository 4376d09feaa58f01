//! Watchlist database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the user_stocks table
#[derive(Debug, Clone, FromRow)]
pub struct WatchlistEntryModel {
    pub id: i64,
    pub user_id: i64,
    pub stock_code: String,
    pub exchange: String,
    pub alias_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
