//! Intent classification for free-text chat messages
//!
//! `classify` is pure: it never touches the store or the network, so every
//! command shape can be tested without I/O.

use crate::value_objects::StockCode;

/// Command prefix for adding a stock to the watchlist
pub const ADD_PREFIX: &str = "加入庫存:";
/// Command prefix for removing a stock from the watchlist
pub const REMOVE_PREFIX: &str = "刪除庫存:";
/// Exact text that lists the watchlist
pub const LIST_COMMAND: &str = "我的庫存";
/// Case-insensitive prefix that asks for an AI opinion
pub const AI_PREFIX: &str = "ai";

const FULL_WIDTH_COLON: char = '：';

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    QuoteLookup(StockCode),
    AddToWatchlist(StockCode),
    RemoveFromWatchlist(StockCode),
    ListWatchlist,
    /// Raw argument after the `ai` prefix, trimmed; may be empty
    AiOpinion(String),
    Unrecognized(UnrecognizedReason),
}

/// Why a message did not map to a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnrecognizedReason {
    /// Free chat; answered with the greeting
    Greeting,
    /// A watchlist command whose argument is not a stock code
    InvalidStockCode(String),
}

impl Intent {
    /// Short name used in logs and metrics fields
    pub fn name(&self) -> &'static str {
        match self {
            Self::QuoteLookup(_) => "quote_lookup",
            Self::AddToWatchlist(_) => "add_to_watchlist",
            Self::RemoveFromWatchlist(_) => "remove_from_watchlist",
            Self::ListWatchlist => "list_watchlist",
            Self::AiOpinion(_) => "ai_opinion",
            Self::Unrecognized(_) => "unrecognized",
        }
    }

    /// Whether serving this intent needs the sender's user id
    pub fn requires_user(&self) -> bool {
        matches!(
            self,
            Self::AddToWatchlist(_) | Self::RemoveFromWatchlist(_) | Self::ListWatchlist
        )
    }
}

/// Classify a text message. The first matching rule wins:
///
/// 1. a bare stock code → [`Intent::QuoteLookup`]
/// 2. `加入庫存:<code>` → [`Intent::AddToWatchlist`]
/// 3. `我的庫存` → [`Intent::ListWatchlist`]
/// 4. `刪除庫存:<code>` → [`Intent::RemoveFromWatchlist`]
/// 5. `ai<code>` (any case) → [`Intent::AiOpinion`]
/// 6. anything else → [`Intent::Unrecognized`]
///
/// Full-width colons are treated as `:`.
pub fn classify(text: &str) -> Intent {
    if let Ok(code) = StockCode::parse(text) {
        return Intent::QuoteLookup(code);
    }

    let normalized = text.replace(FULL_WIDTH_COLON, ":");

    if let Some(arg) = normalized.strip_prefix(ADD_PREFIX) {
        return with_code(arg, Intent::AddToWatchlist);
    }

    if text == LIST_COMMAND {
        return Intent::ListWatchlist;
    }

    if let Some(arg) = normalized.strip_prefix(REMOVE_PREFIX) {
        return with_code(arg, Intent::RemoveFromWatchlist);
    }

    if let Some(arg) = strip_prefix_ignore_ascii_case(text, AI_PREFIX) {
        return Intent::AiOpinion(arg.trim().to_string());
    }

    Intent::Unrecognized(UnrecognizedReason::Greeting)
}

fn with_code(arg: &str, make: fn(StockCode) -> Intent) -> Intent {
    let arg = arg.trim();
    match StockCode::parse(arg) {
        Ok(code) => make(code),
        Err(_) => Intent::Unrecognized(UnrecognizedReason::InvalidStockCode(arg.to_string())),
    }
}

fn strip_prefix_ignore_ascii_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}
