//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of a
//! call; none of them keeps state between requests.

pub mod command;
pub mod context;
pub mod counter;
pub mod error;
pub mod lifecycle;
pub mod messages;
pub mod quote;
pub mod reply;
pub mod watchlist;
pub mod webhook;

// Re-export all services for convenience
pub use command::{CommandOutcome, CommandService};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use counter::ReplyCounterService;
pub use error::{ServiceError, ServiceResult};
pub use lifecycle::LifecycleService;
pub use quote::QuoteService;
pub use reply::ReplyGateway;
pub use watchlist::{WatchlistOutcome, WatchlistService};
pub use webhook::{DispatchReport, WebhookService};
