//! Reply counter maintenance for operators

use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Direct access to a user's reply counter
pub struct ReplyCounterService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReplyCounterService<'a> {
    /// Create a new ReplyCounterService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Atomically add one to the counter and return the new value
    #[instrument(skip(self))]
    pub async fn increment(&self, line_user_id: &str) -> ServiceResult<i32> {
        let count = self
            .ctx
            .user_repo()
            .increment_reply_count(line_user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", line_user_id))?;

        info!(reply_count = count, "Reply counter incremented");
        Ok(count)
    }
}
