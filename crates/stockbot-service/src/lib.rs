//! # stockbot-service
//!
//! Application layer: webhook dispatch, command execution, quote formatting,
//! watchlist management and outbound replies.

pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use services::{
    CommandOutcome, CommandService, DispatchReport, LifecycleService, QuoteService, ReplyCounterService,
    ReplyGateway, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    WatchlistOutcome, WatchlistService, WebhookService,
};
