//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in stockbot-core.

mod error;
mod user;
mod watchlist;

pub use user::PgUserRepository;
pub use watchlist::PgWatchlistRepository;
