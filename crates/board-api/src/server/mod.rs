//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use board_common::{AppConfig, AppError, JwtService};
use board_db::{
    create_pool, run_migrations, DatabaseConfig, PgAdRepository, PgCommentRepository,
    PgUserRepository,
};
use board_service::ServiceContextBuilder;
use board_storage::FsBlobStore;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::create_router;
use crate::state::AppState;

/// Build the application with the default middleware stack
pub fn create_app(state: AppState) -> Router {
    let router = apply_middleware(create_router(&state));
    router.with_state(state)
}

/// Build the application with configured CORS and rate limiting
pub fn create_app_with_config(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware_with_config(
        create_router(&state),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = DatabaseConfig::new(
        config.database.url.clone(),
        config.database.max_connections,
        config.database.min_connections,
    );
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
        info!("Database migrations applied");
    }

    let blob_store = Arc::new(FsBlobStore::new(&config.storage.upload_dir));
    info!(root = %config.storage.upload_dir, "Image storage ready");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .ad_repo(Arc::new(PgAdRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool)))
        .blob_store(blob_store)
        .jwt_service(jwt_service)
        .allow_admin_registration(config.auth.allow_admin_registration)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until Ctrl+C
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app_with_config(state);

    run_server(app, &addr).await
}
