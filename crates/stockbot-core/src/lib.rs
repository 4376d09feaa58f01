//! # stockbot-core
//!
//! Domain layer containing entities, value objects, inbound events, intent
//! classification, and the ports implemented by infrastructure crates.
//! This crate has zero dependencies on infrastructure (database, HTTP, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod intent;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{sort_codes, User, WatchlistEntry, DEFAULT_EXCHANGE};
pub use error::{DomainError, UpstreamError};
pub use events::{IgnoreReason, InboundEvent, RawEvent, WebhookPayload};
pub use intent::{classify, Intent, UnrecognizedReason};
pub use traits::{
    MarketDataApi, MessagingApi, Profile, RepoResult, TextGenerator, UpstreamResult,
    UserRepository, WatchlistRepository,
};
pub use value_objects::{StockCode, StockCodeError};
