//! Authorization stage for protected routes.
//!
//! The stage runs before the handler and may short-circuit with 401.
//! [`AllowAll`] is the only mode shipped; credential verification plugs in
//! as another [`Authenticator`] without touching the handlers.

use crate::config::AuthMode;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Result of authenticating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Allow,
    Deny(String),
}

/// Decides whether a request may proceed to its handler.
pub trait Authenticator: Send + Sync {
    fn name(&self) -> &'static str;

    fn authenticate(&self, request: &Request) -> AuthDecision;
}

/// Lets every request through.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authenticator for AllowAll {
    fn name(&self) -> &'static str {
        "allow_all"
    }

    fn authenticate(&self, _request: &Request) -> AuthDecision {
        AuthDecision::Allow
    }
}

/// Build the authenticator selected by configuration.
pub fn authenticator_for(mode: AuthMode) -> Arc<dyn Authenticator> {
    match mode {
        AuthMode::AllowAll => Arc::new(AllowAll),
    }
}

/// Middleware that runs the configured authenticator.
pub async fn require_auth(
    State(authenticator): State<Arc<dyn Authenticator>>,
    request: Request,
    next: Next,
) -> Response {
    let decision = authenticator.authenticate(&request);
    match decision {
        AuthDecision::Allow => next.run(request).await,
        AuthDecision::Deny(reason) => {
            tracing::warn!(
                authenticator = authenticator.name(),
                path = %request.uri().path(),
                "Request denied: {}",
                reason
            );
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": "Unauthorized" })),
            )
                .into_response()
        }
    }
}
