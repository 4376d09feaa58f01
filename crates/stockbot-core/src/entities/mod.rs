//! Domain entities - core business objects

mod user;
mod watchlist;

pub use user::User;
pub use watchlist::{sort_codes, WatchlistEntry, DEFAULT_EXCHANGE};
