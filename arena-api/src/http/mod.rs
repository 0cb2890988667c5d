// Module: http
// HTTP/JSON API and browser pages for the broadcast room

pub mod error;
pub mod health;
pub mod pages;
pub mod room;
pub mod takeover;
pub mod token;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Duration;

use arena_core::bootstrap::Services;
use arena_core::service::{CredentialIssuer, TakeoverCoordinator};
use arena_core::Config;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub credential_issuer: CredentialIssuer,
    pub takeover_coordinator: TakeoverCoordinator,
}

impl AppState {
    #[must_use]
    pub fn new(config: Arc<Config>, services: Services) -> Self {
        Self {
            config,
            credential_issuer: services.credential_issuer,
            takeover_coordinator: services.takeover_coordinator,
        }
    }
}

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .merge(health::create_health_router())
        .merge(pages::create_pages_router())
        .route("/api/token", post(token::create_token))
        .route("/api/takeover", post(takeover::takeover))
        .route("/api/room", get(room::get_room))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
