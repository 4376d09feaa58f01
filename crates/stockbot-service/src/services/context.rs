//! Service context - dependency container for services
//!
//! Holds the repositories and outbound API clients needed by services.

use std::sync::Arc;

use stockbot_core::traits::{
    MarketDataApi, MessagingApi, TextGenerator, UserRepository, WatchlistRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone: every field is an `Arc` to a port implementation.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    watchlist_repo: Arc<dyn WatchlistRepository>,

    // Outbound APIs
    messaging: Arc<dyn MessagingApi>,
    market_data: Arc<dyn MarketDataApi>,
    text_generator: Arc<dyn TextGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        watchlist_repo: Arc<dyn WatchlistRepository>,
        messaging: Arc<dyn MessagingApi>,
        market_data: Arc<dyn MarketDataApi>,
        text_generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            user_repo,
            watchlist_repo,
            messaging,
            market_data,
            text_generator,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the watchlist repository
    pub fn watchlist_repo(&self) -> &dyn WatchlistRepository {
        self.watchlist_repo.as_ref()
    }

    // === Outbound APIs ===

    /// Get the messaging platform client
    pub fn messaging(&self) -> &dyn MessagingApi {
        self.messaging.as_ref()
    }

    /// Get the market data client
    pub fn market_data(&self) -> &dyn MarketDataApi {
        self.market_data.as_ref()
    }

    /// Get the text generator
    pub fn text_generator(&self) -> &dyn TextGenerator {
        self.text_generator.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("clients", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    watchlist_repo: Option<Arc<dyn WatchlistRepository>>,
    messaging: Option<Arc<dyn MessagingApi>>,
    market_data: Option<Arc<dyn MarketDataApi>>,
    text_generator: Option<Arc<dyn TextGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn watchlist_repo(mut self, repo: Arc<dyn WatchlistRepository>) -> Self {
        self.watchlist_repo = Some(repo);
        self
    }

    pub fn messaging(mut self, client: Arc<dyn MessagingApi>) -> Self {
        self.messaging = Some(client);
        self
    }

    pub fn market_data(mut self, client: Arc<dyn MarketDataApi>) -> Self {
        self.market_data = Some(client);
        self
    }

    pub fn text_generator(mut self, client: Arc<dyn TextGenerator>) -> Self {
        self.text_generator = Some(client);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let missing = |name: &str| ServiceError::validation(format!("{name} is required"));

        Ok(ServiceContext::new(
            self.user_repo.ok_or_else(|| missing("user_repo"))?,
            self.watchlist_repo.ok_or_else(|| missing("watchlist_repo"))?,
            self.messaging.ok_or_else(|| missing("messaging"))?,
            self.market_data.ok_or_else(|| missing("market_data"))?,
            self.text_generator.ok_or_else(|| missing("text_generator"))?,
        ))
    }
}
