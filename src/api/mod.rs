//! Gateway HTTP API.
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /api/models - Upstream model list, behind the authorization stage
//!
//! Every other path serves the embedded catalog page.

mod handlers;
mod types;

use axum::{
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use rust_embed::Embed;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{authenticator_for, require_auth, Authenticator};
use crate::config::{Config, LogVerbosity};
use crate::upstream::UpstreamClient;

pub use types::*;

#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

/// Application state shared across handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub authenticator: Arc<dyn Authenticator>,
    pub verbosity: LogVerbosity,
}

impl AppState {
    pub fn new(
        upstream: UpstreamClient,
        authenticator: Arc<dyn Authenticator>,
        verbosity: LogVerbosity,
    ) -> Self {
        Self {
            upstream,
            authenticator,
            verbosity,
        }
    }

    /// Build state from the process configuration.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Ok(Self::new(
            UpstreamClient::from_config(&config.upstream)?,
            authenticator_for(config.auth.mode),
            config.app.log_verbosity,
        ))
    }
}

/// Create the API router with the given state.
pub fn create_router_with_state(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/api/models", get(handlers::list_models))
        .route_layer(middleware::from_fn_with_state(
            state.authenticator.clone(),
            require_auth,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(protected)
        .with_state(Arc::new(state))
        .fallback(static_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Serve embedded static files
async fn static_handler(uri: axum::http::Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path)
                .first_or_octet_stream()
                .to_string();
            ([(header::CONTENT_TYPE, mime)], content.data.into_owned()).into_response()
        }
        None => match StaticAssets::get("index.html") {
            Some(content) => (
                [(header::CONTENT_TYPE, "text/html".to_string())],
                content.data.into_owned(),
            )
                .into_response(),
            None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        },
    }
}
