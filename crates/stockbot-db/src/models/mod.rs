//! Database models - SQLx-compatible structs for PostgreSQL tables

mod user;
mod watchlist;

pub use user::UserModel;
pub use watchlist::WatchlistEntryModel;
