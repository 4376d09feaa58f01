//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the app_users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub line_user_id: String,
    pub display_name: Option<String>,
    pub is_active: bool,
    pub reply_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
