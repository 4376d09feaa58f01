//! # stockbot-db
//!
//! Database layer implementing the repository traits with PostgreSQL via SQLx.
//!
//! Two tables: `app_users` (one row per LINE user, soft-deactivated on
//! unfollow) and `user_stocks` (watchlist rows, unique per user and code).
//! Queries are built at runtime with `sqlx::query_as`, so no database is
//! needed at compile time.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockbot_db::{create_pool, DatabaseConfig, PgUserRepository};
//! use stockbot_core::traits::UserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new("postgres://localhost/stockbot", 10, 1);
//!     let pool = create_pool(&config).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!
//!     let user = user_repo.upsert_active("U123", Some("Alice")).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgUserRepository, PgWatchlistRepository};
