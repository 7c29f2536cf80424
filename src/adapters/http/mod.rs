//! HTTP adapters - REST API implementations.
//!
//! [`app_router`] assembles the full application: profile endpoints under
//! `/api`, a `/health` probe, and the cross-cutting tower layers (body
//! limit, timeout, CORS, request tracing).

pub mod profile;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::ServerConfig;
use crate::ports::ProfileStore;

pub use profile::{profile_routes, ProfileHandlers};

/// Build the application router over a profile store.
pub fn app_router(store: Arc<dyn ProfileStore>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", profile_routes(ProfileHandlers::new(store)))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// GET /health - Liveness probe
async fn health() -> &'static str {
    "ok"
}

/// Any origin when none are configured, otherwise only the listed ones.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let configured = config.cors_origins_list();
    if configured.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}
