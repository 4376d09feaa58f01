//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use stockbot_common::{AppConfig, AppError};
use stockbot_db::{create_pool, run_migrations, PgUserRepository, PgWatchlistRepository};
use stockbot_service::ServiceContextBuilder;
use stockbot_upstream::{GeminiClient, LineClient, TwseClient};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = apply_middleware(create_router(state.request_timeout()));
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = stockbot_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("migration failed: {e}")))?;
        info!("Database migrations applied");
    }

    // Create outbound clients
    let timeout = config.http.outbound_timeout;
    let line = LineClient::new(&config.line, timeout).map_err(|e| AppError::Config(e.to_string()))?;
    let twse = TwseClient::new(&config.market, timeout).map_err(|e| AppError::Config(e.to_string()))?;
    let gemini =
        GeminiClient::new(&config.gemini, timeout).map_err(|e| AppError::Config(e.to_string()))?;
    if !config.gemini.is_enabled() {
        warn!("GEMINI_API_KEY not set, AI answers will use the fallback text");
    }

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .watchlist_repo(Arc::new(PgWatchlistRepository::new(pool)))
        .messaging(Arc::new(line))
        .market_data(Arc::new(twse))
        .text_generator(Arc::new(gemini))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::from_config(service_context, config))
}

/// Serve `app` on an already bound listener until the process is stopped
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Server(format!("Failed to read local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    // Create app state
    let state = create_app_state(&config).await?;

    // Build application
    let app = create_app(state);

    let listener = TcpListener::bind(addr.as_str())
        .await
        .map_err(|e| AppError::Server(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}
