//! Follow / unfollow handling

use stockbot_core::entities::User;
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::messages;
use super::reply::ReplyGateway;

/// Keeps user records in step with follow state
pub struct LifecycleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LifecycleService<'a> {
    /// Create a new LifecycleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create or reactivate the user and greet them.
    ///
    /// The profile lookup is best effort. The welcome reply is not counted
    /// and a failed send does not fail the event.
    #[instrument(skip(self, reply_token))]
    pub async fn on_follow(&self, line_user_id: &str, reply_token: Option<&str>) -> ServiceResult<User> {
        let display_name = match self.ctx.messaging().get_profile(line_user_id).await {
            Ok(profile) => profile.display_name.filter(|name| !name.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, "Profile lookup failed, continuing without display name");
                None
            }
        };

        let user = self
            .ctx
            .user_repo()
            .upsert_active(line_user_id, display_name.as_deref())
            .await?;
        info!(user_id = user.id, "User followed");

        if let Some(token) = reply_token {
            let welcome = messages::welcome(user.greeting_name());
            // Logged inside the gateway
            let _ = ReplyGateway::new(self.ctx).send_text(token, &welcome).await;
        }

        Ok(user)
    }

    /// Deactivate the user; returns whether a record existed
    #[instrument(skip(self))]
    pub async fn on_unfollow(&self, line_user_id: &str) -> ServiceResult<bool> {
        let found = self.ctx.user_repo().deactivate(line_user_id).await?;
        if found {
            info!("User unfollowed");
        } else {
            info!("Unfollow from unknown user ignored");
        }
        Ok(found)
    }
}
