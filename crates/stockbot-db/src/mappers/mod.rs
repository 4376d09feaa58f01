//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions for rows read from PostgreSQL.
//! Writes bind primitive values directly, so there are no insert structs.

mod user;
mod watchlist;
