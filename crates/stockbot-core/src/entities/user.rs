//! User entity - a LINE account that has followed the bot

use chrono::{DateTime, Utc};

/// User entity keyed by the LINE platform user id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Surrogate key assigned by the store
    pub id: i64,
    pub line_user_id: String,
    pub display_name: Option<String>,
    pub is_active: bool,
    pub reply_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a freshly followed user (active, no replies yet)
    pub fn new(id: i64, line_user_id: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            line_user_id,
            display_name,
            is_active: true,
            reply_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name used when greeting the user; empty when the profile was unavailable
    pub fn greeting_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("")
    }

    /// Mark the user as following again, keeping the old name unless a new one is known
    pub fn reactivate(&mut self, display_name: Option<String>) {
        if display_name.is_some() {
            self.display_name = display_name;
        }
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Mark the user as having blocked/unfollowed the bot
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Count one delivered reply
    pub fn record_reply(&mut self) {
        self.reply_count = self.reply_count.saturating_add(1);
        self.updated_at = Utc::now();
    }
}
