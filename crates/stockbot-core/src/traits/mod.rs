//! Ports - interfaces implemented by the infrastructure crates

mod gateways;
mod repositories;

pub use gateways::{MarketDataApi, MessagingApi, Profile, TextGenerator, UpstreamResult};
pub use repositories::{RepoResult, UserRepository, WatchlistRepository};
