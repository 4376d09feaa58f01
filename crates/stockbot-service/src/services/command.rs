//! Text command execution
//!
//! Classifies a text message, computes the reply, sends it, and counts it.

use stockbot_core::{classify, Intent, UnrecognizedReason};
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::messages;
use super::quote::QuoteService;
use super::reply::ReplyGateway;
use super::watchlist::WatchlistService;

/// What happened to one text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// `Intent::name` of the classified message
    pub intent: &'static str,
    /// Text sent back to the user
    pub reply: String,
    /// Counter value after this reply; `None` when it was not counted
    pub reply_count: Option<i32>,
}

/// Runs classified intents against the store and upstream APIs
pub struct CommandService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommandService<'a> {
    /// Create a new CommandService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Handle one text message.
    ///
    /// Exactly one reply is sent. A store failure while computing the reply
    /// aborts before sending. The counter is bumped only after a delivered
    /// reply, and a failed bump is logged but does not fail the message.
    #[instrument(skip(self, reply_token, text))]
    pub async fn handle(
        &self,
        line_user_id: Option<&str>,
        reply_token: &str,
        text: &str,
    ) -> ServiceResult<CommandOutcome> {
        let intent = classify(text);
        debug!(intent = intent.name(), "Message classified");

        let reply = self.compose_reply(&intent, line_user_id).await?;

        ReplyGateway::new(self.ctx)
            .send_text(reply_token, &reply)
            .await
            .map_err(ServiceError::Upstream)?;

        let reply_count = match line_user_id {
            Some(user_id) => self.count_reply(user_id).await,
            None => None,
        };

        Ok(CommandOutcome {
            intent: intent.name(),
            reply,
            reply_count,
        })
    }

    /// Compute the reply text for an intent without sending it
    pub async fn compose_reply(&self, intent: &Intent, line_user_id: Option<&str>) -> ServiceResult<String> {
        if intent.requires_user() && line_user_id.is_none() {
            return Ok(messages::UNIDENTIFIED_USER.to_string());
        }
        // Read only by the watchlist arms, which the guard above covers
        let user_id = line_user_id.unwrap_or_default();
        let watchlist = WatchlistService::new(self.ctx);

        match intent {
            Intent::QuoteLookup(code) => Ok(QuoteService::new(self.ctx).lookup(code).await),
            Intent::AddToWatchlist(code) => {
                known_user(watchlist.add(user_id, code).await.map(|o| o.message(code)))
            }
            Intent::RemoveFromWatchlist(code) => {
                known_user(watchlist.remove(user_id, code).await.map(|o| o.message(code)))
            }
            Intent::ListWatchlist => {
                known_user(watchlist.list(user_id).await.map(|codes| messages::watchlist(&codes)))
            }
            Intent::AiOpinion(arg) => Ok(self.ai_opinion(arg).await),
            Intent::Unrecognized(UnrecognizedReason::Greeting) => Ok(messages::GREETING.to_string()),
            Intent::Unrecognized(UnrecognizedReason::InvalidStockCode(_)) => {
                Ok(messages::INVALID_STOCK_CODE.to_string())
            }
        }
    }

    async fn ai_opinion(&self, arg: &str) -> String {
        if arg.is_empty() {
            return messages::AI_MISSING_CODE.to_string();
        }

        match self.ctx.text_generator().generate(&messages::ai_prompt(arg)).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("Text generator returned an empty answer");
                messages::AI_UNAVAILABLE.to_string()
            }
            Err(e) => {
                warn!(error = %e, "Text generation failed");
                messages::AI_UNAVAILABLE.to_string()
            }
        }
    }

    async fn count_reply(&self, line_user_id: &str) -> Option<i32> {
        match self.ctx.user_repo().increment_reply_count(line_user_id).await {
            Ok(Some(count)) => Some(count),
            Ok(None) => {
                debug!("Reply from unregistered user not counted");
                None
            }
            Err(e) => {
                warn!(error = %e, "Reply delivered but counter update failed");
                None
            }
        }
    }
}

/// An unknown user gets a fixed text instead of an error
fn known_user(result: ServiceResult<String>) -> ServiceResult<String> {
    match result {
        Err(e) if e.is_user_not_found() => Ok(messages::UNKNOWN_USER.to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestHarness;
    use stockbot_core::UpstreamError;

    const QUOTE: &str = r#"{"msgArray":[{"n":"台積電","c":"2330","z":"105.50","y":"100.00","v":"1"}]}"#;

    #[tokio::test]
    async fn test_add_replies_and_counts() {
        let harness = TestHarness::new();
        harness.users.insert_user("U1", None, true);
        let service = CommandService::new(&harness.ctx);

        let outcome = service.handle(Some("U1"), "R1", "加入庫存:2330").await.unwrap();

        assert_eq!(outcome.intent, "add_to_watchlist");
        assert_eq!(outcome.reply, "成功加入股票 2330 到庫存！");
        assert_eq!(outcome.reply_count, Some(1));
        assert_eq!(harness.watchlist.len(), 1);
        assert_eq!(harness.messaging.reply_texts(), ["成功加入股票 2330 到庫存！"]);
        assert_eq!(harness.users.get("U1").unwrap().reply_count, 1);
    }

    #[tokio::test]
    async fn test_quote_lookup_is_counted() {
        let harness = TestHarness::new();
        harness.users.insert_user("U1", None, true);
        harness.market.set_quote("2330", QUOTE);
        let service = CommandService::new(&harness.ctx);

        let outcome = service.handle(Some("U1"), "R1", "2330").await.unwrap();
        assert!(outcome.reply.starts_with("台積電（2330）"));
        assert_eq!(outcome.reply_count, Some(1));
    }

    #[tokio::test]
    async fn test_quote_failure_uses_fallback() {
        let harness = TestHarness::new();
        harness.market.fail_with(UpstreamError::status(500, "busy"));
        let service = CommandService::new(&harness.ctx);

        let outcome = service.handle(None, "R1", "2330").await.unwrap();
        assert_eq!(outcome.reply, messages::QUOTE_UNAVAILABLE);
        assert_eq!(outcome.reply_count, None);
    }

    #[tokio::test]
    async fn test_watchlist_without_user_id() {
        let harness = TestHarness::new();
        let service = CommandService::new(&harness.ctx);

        for (token, text) in [("R1", "我的庫存"), ("R2", "加入庫存:2330"), ("R3", "刪除庫存:2330")] {
            let outcome = service.handle(None, token, text).await.unwrap();
            assert_eq!(outcome.reply, messages::UNIDENTIFIED_USER, "{text}");
            assert_eq!(outcome.reply_count, None);
        }
        assert!(harness.watchlist.is_empty());
        assert_eq!(harness.messaging.replies().len(), 3);
    }

    #[tokio::test]
    async fn test_watchlist_for_unknown_user() {
        let harness = TestHarness::new();
        let service = CommandService::new(&harness.ctx);

        let outcome = service.handle(Some("U9"), "R1", "刪除庫存:2330").await.unwrap();
        assert_eq!(outcome.reply, messages::UNKNOWN_USER);
        assert_eq!(outcome.reply_count, None);
    }

    #[tokio::test]
    async fn test_list_sorted() {
        let harness = TestHarness::new();
        let user = harness.users.insert_user("U1", None, true);
        for c in ["100", "9999", "2330"] {
            harness.watchlist.insert(user.id, c);
        }
        let service = CommandService::new(&harness.ctx);

        let outcome = service.handle(Some("U1"), "R1", "我的庫存").await.unwrap();
        assert_eq!(outcome.reply, "您的庫存有以下股票代號：\n100\n2330\n9999");
    }

    #[tokio::test]
    async fn test_invalid_code_and_greeting() {
        let harness = TestHarness::new();
        let service = CommandService::new(&harness.ctx);

        let outcome = service.handle(None, "R1", "加入庫存:abc").await.unwrap();
        assert_eq!(outcome.reply, messages::INVALID_STOCK_CODE);

        let outcome = service.handle(None, "R2", "你好").await.unwrap();
        assert_eq!(outcome.reply, messages::GREETING);
        assert_eq!(harness.messaging.replies().len(), 2);
    }

    #[tokio::test]
    async fn test_ai_opinion() {
        let harness = TestHarness::new();
        harness.text.set_answer("  短線偏多  ");
        let service = CommandService::new(&harness.ctx);

        let outcome = service.handle(None, "R1", "AI 2330").await.unwrap();
        assert_eq!(outcome.reply, "短線偏多");
        assert_eq!(harness.text.prompts(), [messages::ai_prompt("2330")]);
    }

    #[tokio::test]
    async fn test_ai_without_code_skips_upstream() {
        let harness = TestHarness::new();
        let service = CommandService::new(&harness.ctx);

        let outcome = service.handle(None, "R1", "ai").await.unwrap();
        assert_eq!(outcome.reply, messages::AI_MISSING_CODE);
        assert!(harness.text.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_ai_failure_uses_fallback() {
        let harness = TestHarness::new();
        harness.text.fail_with(UpstreamError::NotConfigured("gemini"));
        let service = CommandService::new(&harness.ctx);

        let outcome = service.handle(None, "R1", "ai 2330").await.unwrap();
        assert_eq!(outcome.reply, messages::AI_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_store_failure_sends_nothing() {
        let harness = TestHarness::new();
        harness.users.insert_user("U1", None, true);
        harness.watchlist.set_unavailable(true);
        let service = CommandService::new(&harness.ctx);

        let err = service.handle(Some("U1"), "R1", "加入庫存:2330").await.unwrap_err();
        assert!(err.is_persistence());
        assert!(harness.messaging.replies().is_empty());
        assert_eq!(harness.users.get("U1").unwrap().reply_count, 0);
    }

    #[tokio::test]
    async fn test_failed_send_is_not_counted() {
        let harness = TestHarness::new();
        harness.users.insert_user("U1", None, true);
        harness.messaging.fail_replies(UpstreamError::Timeout);
        let service = CommandService::new(&harness.ctx);

        let err = service.handle(Some("U1"), "R1", "你好").await.unwrap_err();
        assert!(matches!(err, ServiceError::Upstream(UpstreamError::Timeout)));
        assert_eq!(harness.users.get("U1").unwrap().reply_count, 0);
    }

    #[tokio::test]
    async fn test_counter_failure_after_send_is_tolerated() {
        let harness = TestHarness::new();
        harness.users.insert_user("U1", None, true);
        harness.market.set_quote("2330", QUOTE);
        let service = CommandService::new(&harness.ctx);

        harness.users.set_unavailable(true);
        let outcome = service.handle(Some("U1"), "R1", "2330").await.unwrap();
        assert_eq!(outcome.reply_count, None);
        assert_eq!(harness.messaging.replies().len(), 1);
    }
}
