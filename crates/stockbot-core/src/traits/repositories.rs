//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{User, WatchlistEntry};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by LINE user id (active or not)
    async fn find_by_line_id(&self, line_user_id: &str) -> RepoResult<Option<User>>;

    /// Create the user, or reactivate an existing one.
    ///
    /// `display_name` replaces the stored name only when `Some`. The reply
    /// counter starts at zero on creation and is left untouched otherwise.
    async fn upsert_active(&self, line_user_id: &str, display_name: Option<&str>) -> RepoResult<User>;

    /// Set `is_active = false`. Returns whether a record matched.
    async fn deactivate(&self, line_user_id: &str) -> RepoResult<bool>;

    /// Atomically add one to the reply counter and refresh `updated_at`.
    ///
    /// Returns the new count, or `None` when no such user exists.
    async fn increment_reply_count(&self, line_user_id: &str) -> RepoResult<Option<i32>>;

    /// Check that the store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Watchlist Repository
// ============================================================================

#[async_trait]
pub trait WatchlistRepository: Send + Sync {
    /// All entries for a user, in insertion order
    async fn list_by_user(&self, user_id: i64) -> RepoResult<Vec<WatchlistEntry>>;

    /// Insert unless the (user, code) pair exists. Returns whether a row was added.
    async fn add(&self, user_id: i64, stock_code: &str) -> RepoResult<bool>;

    /// Delete the (user, code) pair. Returns whether a row was removed.
    async fn remove(&self, user_id: i64, stock_code: &str) -> RepoResult<bool>;
}
