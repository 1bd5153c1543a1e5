//! # LessonSync API
//!
//! The API crate provides the web server implementation for the LessonSync
//! studio service. It defines RESTful endpoints for browsing lessons,
//! booking and cancelling reservations, front-desk check-in, and triggering
//! calendar reconciliation.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Provide cross-cutting concerns like error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework; persistence and the calendar
//! feed are reached through the [`lessonsync_db::store::StudioStore`] and
//! [`lessonsync_calendar::feed::EventFeed`] traits held in [`ApiState`].

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use chrono::FixedOffset;
use eyre::Result;
use lessonsync_calendar::feed::EventFeed;
use lessonsync_db::store::StudioStore;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// Handlers reach the database and the calendar feed through the trait
/// objects held here, so tests can run them against the in-memory store
/// and a scripted feed.
pub struct ApiState {
    /// Lesson/member/reservation store
    pub store: Arc<dyn StudioStore>,
    /// Upstream calendar feed for the sync endpoint
    pub feed: Arc<dyn EventFeed>,
    /// The studio's fixed UTC offset
    pub studio_offset: FixedOffset,
}

/// Starts the API server with the provided configuration and state
///
/// This function initializes logging, configures routes, and starts the
/// HTTP server.
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Lesson catalog endpoints
        .merge(routes::lessons::routes())
        // Booking and cancellation endpoints
        .merge(routes::reservations::routes())
        // Front-desk check-in endpoints
        .merge(routes::checkin::routes())
        // Calendar reconciliation trigger
        .merge(routes::sync::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let mut allowed = Vec::new();
        for origin in origins {
            allowed.push(
                origin
                    .parse()
                    .map_err(|e| eyre::eyre!("invalid CORS origin {origin}: {e}"))?,
            );
        }
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(allowed);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(tower_http::timeout::TimeoutLayer::new(
                std::time::Duration::from_secs(config.request_timeout),
            ))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
