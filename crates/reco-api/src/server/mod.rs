//! Server setup and initialization
//!
//! Provides the application builder and server runner. All dependencies are
//! constructed here, once, and injected through the application state.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reco_common::{AppConfig, AppError, JwtService};
use reco_db::{MongoCounterSync, MongoQueryRepository, MongoRecommendationRepository};
use reco_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(
        router,
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create the MongoDB client; the driver pools connections internally and
    // the handle lives for the whole process.
    info!("Connecting to MongoDB...");
    let client = reco_db::connect(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    let database = client.database(&config.database.name);
    info!(database = %config.database.name, "MongoDB client initialized");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.token_expiry,
    ));

    // Create repositories
    let query_repo = Arc::new(MongoQueryRepository::new(&database));
    let recommendation_repo = Arc::new(MongoRecommendationRepository::new(&database));
    let counter_sync = Arc::new(MongoCounterSync::new(client, &database));

    // Build service context
    let service_context = ServiceContext::new(
        database,
        query_repo,
        recommendation_repo,
        counter_sync,
        jwt_service,
    );

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {}", e)))?;

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
