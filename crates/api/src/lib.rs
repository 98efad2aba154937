//! # Slotbook API
//!
//! HTTP surface of the booking service: the service catalog, appointments,
//! and availability queries, all backed by a [`BookingEngine`].
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Turn requests into validated engine calls
//! - **Middleware**: Error mapping to HTTP responses
//! - **Config**: Environment configuration
//!
//! The API uses Axum as the web framework; persistence is whatever
//! `BookingStore` the engine was built with.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error mapping
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{http::HeaderValue, Router};
use eyre::{Result, WrapErr};
use slotbook_core::engine::BookingEngine;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Availability & booking engine, already wired to its store
    pub engine: BookingEngine,
}

/// Installs the global tracing subscriber at `level`
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the router with every endpoint and request tracing, without
/// binding a socket
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Service catalog endpoints
        .merge(routes::service::routes())
        // Booking endpoints
        .merge(routes::appointment::routes())
        // Availability endpoints
        .merge(routes::availability::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and engine
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use slotbook_api::{config::ApiConfig, start_server};
/// # use slotbook_core::{engine::BookingEngine, store::memory::InMemoryStore};
/// # async fn run() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// let engine = BookingEngine::new(Arc::new(InMemoryStore::new()), config.engine_config());
/// start_server(config, engine).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, engine: BookingEngine) -> Result<()> {
    let state = Arc::new(ApiState { engine });
    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS value")?;

        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
