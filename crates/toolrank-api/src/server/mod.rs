//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use toolrank_common::{AppConfig, AppError, JwtService, StorageBackend};
use toolrank_db::{
    create_pool, run_migrations, DatabaseConfig, MemoryFavoriteRepository,
    MemoryUpvoteRepository, PgFavoriteRepository, PgUpvoteRepository,
};
use toolrank_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes get the plain stack so they are never rate limited.
///
/// # Errors
/// Returns `AppError::Config` if the rate limit settings are unusable
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(api.merge(health).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.auth.jwt_secret,
        config.auth.audience.clone(),
    ));

    let builder = ServiceContextBuilder::new()
        .jwt_service(jwt_service)
        .daily_limit(config.upvote.daily_limit);

    // Create repositories
    let builder = match config.storage.backend {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_settings(&config.database).ok_or_else(|| {
                AppError::Config("DATABASE_URL is required for the postgres backend".to_string())
            })?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&db_config)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            if config.database.run_migrations {
                run_migrations(&pool)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                info!("Database migrations applied");
            }

            builder
                .upvote_repo(Arc::new(PgUpvoteRepository::new(pool.clone())))
                .favorite_repo(Arc::new(PgFavoriteRepository::new(pool)))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; all votes are lost on restart");
            builder
                .upvote_repo(Arc::new(MemoryUpvoteRepository::new()))
                .favorite_repo(Arc::new(MemoryFavoriteRepository::new()))
        }
    };

    // Build service context
    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state)?;

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
