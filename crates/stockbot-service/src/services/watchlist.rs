//! Watchlist service
//!
//! Add, remove and list the instrument codes a user has saved.

use stockbot_core::entities::{sort_codes, User};
use stockbot_core::{DomainError, StockCode};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::messages;

/// Result of a watchlist mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchlistOutcome {
    Added,
    AlreadyPresent,
    Removed,
    NotPresent,
}

impl WatchlistOutcome {
    /// Chat text describing the outcome
    pub fn message(self, code: &StockCode) -> String {
        match self {
            Self::Added => messages::added(code),
            Self::AlreadyPresent => messages::already_added(code),
            Self::Removed => messages::removed(code),
            Self::NotPresent => messages::not_in_watchlist(code),
        }
    }
}

/// Watchlist service
pub struct WatchlistService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WatchlistService<'a> {
    /// Create a new WatchlistService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Save a code; a repeated add reports `AlreadyPresent` without a second row
    #[instrument(skip(self), fields(code = %code))]
    pub async fn add(&self, line_user_id: &str, code: &StockCode) -> ServiceResult<WatchlistOutcome> {
        let user = self.active_user(line_user_id).await?;

        let inserted = self
            .ctx
            .watchlist_repo()
            .add(user.id, code.as_str())
            .await?;

        if inserted {
            info!(user_id = user.id, "Stock added to watchlist");
            Ok(WatchlistOutcome::Added)
        } else {
            Ok(WatchlistOutcome::AlreadyPresent)
        }
    }

    /// Drop a code; removing an absent code reports `NotPresent`
    #[instrument(skip(self), fields(code = %code))]
    pub async fn remove(&self, line_user_id: &str, code: &StockCode) -> ServiceResult<WatchlistOutcome> {
        let user = self.active_user(line_user_id).await?;

        let deleted = self
            .ctx
            .watchlist_repo()
            .remove(user.id, code.as_str())
            .await?;

        if deleted {
            info!(user_id = user.id, "Stock removed from watchlist");
            Ok(WatchlistOutcome::Removed)
        } else {
            Ok(WatchlistOutcome::NotPresent)
        }
    }

    /// Saved codes in numeric order
    #[instrument(skip(self))]
    pub async fn list(&self, line_user_id: &str) -> ServiceResult<Vec<String>> {
        let user = self
            .ctx
            .user_repo()
            .find_by_line_id(line_user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(line_user_id.to_string()))?;

        let mut codes: Vec<String> = self
            .ctx
            .watchlist_repo()
            .list_by_user(user.id)
            .await?
            .into_iter()
            .map(|entry| entry.stock_code)
            .collect();
        sort_codes(&mut codes);

        Ok(codes)
    }

    async fn active_user(&self, line_user_id: &str) -> ServiceResult<User> {
        let user = self
            .ctx
            .user_repo()
            .find_by_line_id(line_user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| DomainError::UserNotFound(line_user_id.to_string()))?;
        Ok(user)
    }
}
