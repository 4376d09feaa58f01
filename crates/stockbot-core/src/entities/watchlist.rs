//! Watchlist entry - one instrument saved by one user

use chrono::{DateTime, Utc};

/// Exchange tag used when none is given (listed stocks)
pub const DEFAULT_EXCHANGE: &str = "tse";

/// A saved instrument, unique per (user_id, stock_code)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistEntry {
    pub id: i64,
    pub user_id: i64,
    pub stock_code: String,
    pub exchange: String,
    pub alias_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WatchlistEntry {
    /// Create a new entry on the default exchange
    pub fn new(id: i64, user_id: i64, stock_code: String) -> Self {
        Self {
            id,
            user_id,
            stock_code,
            exchange: DEFAULT_EXCHANGE.to_string(),
            alias_name: None,
            created_at: Utc::now(),
        }
    }
}

/// Sort codes by numeric value; codes that are not numbers go last.
///
/// Rows written before validation existed may hold non-numeric codes, so the
/// order has to stay total. Ties (and non-numeric codes) fall back to string order.
pub fn sort_codes(codes: &mut [String]) {
    codes.sort_by(|a, b| {
        let key = |s: &str| s.parse::<u64>().map_or((1, 0), |n| (0, n));
        key(a).cmp(&key(b)).then_with(|| a.cmp(b))
    });
}
