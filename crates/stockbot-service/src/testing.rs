//! In-memory port implementations for tests
//!
//! Enabled for this crate's unit tests and, through the `testing` feature,
//! for downstream test suites that need a [`ServiceContext`] without a
//! database or network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use stockbot_core::entities::{User, WatchlistEntry};
use stockbot_core::traits::{
    MarketDataApi, MessagingApi, Profile, RepoResult, TextGenerator, UpstreamResult,
    UserRepository, WatchlistRepository,
};
use stockbot_core::{DomainError, StockCode, UpstreamError};

use crate::services::ServiceContext;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn unavailable() -> DomainError {
    DomainError::DatabaseError("store unavailable".to_string())
}

// ============================================================================
// Users
// ============================================================================

#[derive(Default)]
struct UserTable {
    next_id: i64,
    rows: HashMap<String, User>,
    unavailable: bool,
}

/// User store backed by a map keyed on the LINE user id
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    /// Seed a user directly
    pub fn insert_user(&self, line_user_id: &str, display_name: Option<&str>, is_active: bool) -> User {
        let mut table = lock(&self.table);
        table.next_id += 1;
        let mut user = User::new(
            table.next_id,
            line_user_id.to_string(),
            display_name.map(str::to_string),
        );
        user.is_active = is_active;
        table.rows.insert(line_user_id.to_string(), user.clone());
        user
    }

    /// Current state of a user
    pub fn get(&self, line_user_id: &str) -> Option<User> {
        lock(&self.table).rows.get(line_user_id).cloned()
    }

    /// Make every call fail with a database error
    pub fn set_unavailable(&self, unavailable: bool) {
        lock(&self.table).unavailable = unavailable;
    }

    fn table(&self) -> RepoResult<MutexGuard<'_, UserTable>> {
        let table = lock(&self.table);
        if table.unavailable {
            return Err(unavailable());
        }
        Ok(table)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_line_id(&self, line_user_id: &str) -> RepoResult<Option<User>> {
        Ok(self.table()?.rows.get(line_user_id).cloned())
    }

    async fn upsert_active(&self, line_user_id: &str, display_name: Option<&str>) -> RepoResult<User> {
        let mut table = self.table()?;
        let display_name = display_name.map(str::to_string);

        if let Some(user) = table.rows.get_mut(line_user_id) {
            user.reactivate(display_name);
            return Ok(user.clone());
        }

        table.next_id += 1;
        let user = User::new(table.next_id, line_user_id.to_string(), display_name);
        table.rows.insert(line_user_id.to_string(), user.clone());
        Ok(user)
    }

    async fn deactivate(&self, line_user_id: &str) -> RepoResult<bool> {
        let mut table = self.table()?;
        Ok(table
            .rows
            .get_mut(line_user_id)
            .map(User::deactivate)
            .is_some())
    }

    async fn increment_reply_count(&self, line_user_id: &str) -> RepoResult<Option<i32>> {
        let mut table = self.table()?;
        Ok(table.rows.get_mut(line_user_id).map(|user| {
            user.record_reply();
            user.reply_count
        }))
    }

    async fn ping(&self) -> RepoResult<()> {
        self.table().map(|_| ())
    }
}

// ============================================================================
// Watchlist
// ============================================================================

#[derive(Default)]
struct WatchlistTable {
    next_id: i64,
    rows: Vec<WatchlistEntry>,
    unavailable: bool,
}

/// Watchlist store keeping rows in insertion order
#[derive(Default)]
pub struct InMemoryWatchlistRepository {
    table: Mutex<WatchlistTable>,
}

impl InMemoryWatchlistRepository {
    /// Seed a row directly, bypassing code validation
    pub fn insert(&self, user_id: i64, stock_code: &str) {
        let mut table = lock(&self.table);
        table.next_id += 1;
        let entry = WatchlistEntry::new(table.next_id, user_id, stock_code.to_string());
        table.rows.push(entry);
    }

    /// Total number of rows across all users
    pub fn len(&self) -> usize {
        lock(&self.table).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every call fail with a database error
    pub fn set_unavailable(&self, unavailable: bool) {
        lock(&self.table).unavailable = unavailable;
    }

    fn table(&self) -> RepoResult<MutexGuard<'_, WatchlistTable>> {
        let table = lock(&self.table);
        if table.unavailable {
            return Err(unavailable());
        }
        Ok(table)
    }
}

#[async_trait]
impl WatchlistRepository for InMemoryWatchlistRepository {
    async fn list_by_user(&self, user_id: i64) -> RepoResult<Vec<WatchlistEntry>> {
        Ok(self
            .table()?
            .rows
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add(&self, user_id: i64, stock_code: &str) -> RepoResult<bool> {
        let mut table = self.table()?;
        let exists = table
            .rows
            .iter()
            .any(|entry| entry.user_id == user_id && entry.stock_code == stock_code);
        if exists {
            return Ok(false);
        }

        table.next_id += 1;
        let entry = WatchlistEntry::new(table.next_id, user_id, stock_code.to_string());
        table.rows.push(entry);
        Ok(true)
    }

    async fn remove(&self, user_id: i64, stock_code: &str) -> RepoResult<bool> {
        let mut table = self.table()?;
        let before = table.rows.len();
        table
            .rows
            .retain(|entry| !(entry.user_id == user_id && entry.stock_code == stock_code));
        Ok(table.rows.len() < before)
    }
}

// ============================================================================
// Messaging platform
// ============================================================================

/// One reply the fake platform accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedReply {
    pub reply_token: String,
    pub texts: Vec<String>,
}

#[derive(Default)]
struct MessagingState {
    profiles: HashMap<String, Profile>,
    profile_error: Option<UpstreamError>,
    reply_error: Option<UpstreamError>,
    replies: Vec<RecordedReply>,
}

/// Messaging platform that records replies instead of sending them
#[derive(Default)]
pub struct FakeMessaging {
    state: Mutex<MessagingState>,
}

impl FakeMessaging {
    /// Register a profile with a display name
    pub fn set_profile(&self, user_id: &str, display_name: &str) {
        let profile = Profile {
            user_id: Some(user_id.to_string()),
            display_name: Some(display_name.to_string()),
            ..Profile::default()
        };
        lock(&self.state).profiles.insert(user_id.to_string(), profile);
    }

    /// Fail every profile lookup with `error`
    pub fn fail_profiles(&self, error: UpstreamError) {
        lock(&self.state).profile_error = Some(error);
    }

    /// Reject every reply with `error`; rejected replies are not recorded
    pub fn fail_replies(&self, error: UpstreamError) {
        lock(&self.state).reply_error = Some(error);
    }

    /// Accepted replies in send order
    pub fn replies(&self) -> Vec<RecordedReply> {
        lock(&self.state).replies.clone()
    }

    /// Texts of all accepted replies, flattened
    pub fn reply_texts(&self) -> Vec<String> {
        lock(&self.state)
            .replies
            .iter()
            .flat_map(|reply| reply.texts.iter().cloned())
            .collect()
    }
}

#[async_trait]
impl MessagingApi for FakeMessaging {
    async fn reply_text(&self, reply_token: &str, texts: &[String]) -> UpstreamResult<()> {
        let mut state = lock(&self.state);
        if let Some(error) = &state.reply_error {
            return Err(error.clone());
        }
        if state.replies.iter().any(|reply| reply.reply_token == reply_token) {
            return Err(UpstreamError::status(400, "Invalid reply token"));
        }
        state.replies.push(RecordedReply {
            reply_token: reply_token.to_string(),
            texts: texts.to_vec(),
        });
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> UpstreamResult<Profile> {
        let state = lock(&self.state);
        if let Some(error) = &state.profile_error {
            return Err(error.clone());
        }
        state
            .profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| UpstreamError::status(404, "Not found"))
    }
}

// ============================================================================
// Market data
// ============================================================================

/// Body the exchange returns for codes it does not know
const EMPTY_QUOTE: &str = r#"{"msgArray":[],"rtcode":"0000"}"#;

#[derive(Default)]
struct MarketState {
    quotes: HashMap<String, String>,
    error: Option<UpstreamError>,
}

/// Market data feed serving canned documents
#[derive(Default)]
pub struct FakeMarketData {
    state: Mutex<MarketState>,
}

impl FakeMarketData {
    /// Serve `body` for `code`
    pub fn set_quote(&self, code: &str, body: &str) {
        lock(&self.state)
            .quotes
            .insert(code.to_string(), body.to_string());
    }

    /// Fail every request with `error`
    pub fn fail_with(&self, error: UpstreamError) {
        lock(&self.state).error = Some(error);
    }
}

#[async_trait]
impl MarketDataApi for FakeMarketData {
    async fn fetch_quote(&self, code: &StockCode) -> UpstreamResult<String> {
        let state = lock(&self.state);
        if let Some(error) = &state.error {
            return Err(error.clone());
        }
        Ok(state
            .quotes
            .get(code.as_str())
            .cloned()
            .unwrap_or_else(|| EMPTY_QUOTE.to_string()))
    }
}

// ============================================================================
// Text generation
// ============================================================================

#[derive(Default)]
struct TextState {
    answer: Option<String>,
    error: Option<UpstreamError>,
    prompts: Vec<String>,
}

/// Text generator with a fixed answer; unconfigured until one is set
#[derive(Default)]
pub struct FakeTextGenerator {
    state: Mutex<TextState>,
}

impl FakeTextGenerator {
    /// Answer every prompt with `answer`
    pub fn set_answer(&self, answer: &str) {
        lock(&self.state).answer = Some(answer.to_string());
    }

    /// Fail every prompt with `error`
    pub fn fail_with(&self, error: UpstreamError) {
        lock(&self.state).error = Some(error);
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.state).prompts.clone()
    }
}

#[async_trait]
impl TextGenerator for FakeTextGenerator {
    async fn generate(&self, prompt: &str) -> UpstreamResult<String> {
        let mut state = lock(&self.state);
        state.prompts.push(prompt.to_string());
        if let Some(error) = &state.error {
            return Err(error.clone());
        }
        state
            .answer
            .clone()
            .ok_or(UpstreamError::NotConfigured("gemini"))
    }
}

// ============================================================================
// Harness
// ============================================================================

/// A [`ServiceContext`] wired to in-memory ports, with handles to each
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub users: Arc<InMemoryUserRepository>,
    pub watchlist: Arc<InMemoryWatchlistRepository>,
    pub messaging: Arc<FakeMessaging>,
    pub market: Arc<FakeMarketData>,
    pub text: Arc<FakeTextGenerator>,
}

impl TestHarness {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let watchlist = Arc::new(InMemoryWatchlistRepository::default());
        let messaging = Arc::new(FakeMessaging::default());
        let market = Arc::new(FakeMarketData::default());
        let text = Arc::new(FakeTextGenerator::default());

        let ctx = ServiceContext::new(
            users.clone(),
            watchlist.clone(),
            messaging.clone(),
            market.clone(),
            text.clone(),
        );

        Self {
            ctx,
            users,
            watchlist,
            messaging,
            market,
            text,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
