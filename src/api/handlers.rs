//! HTTP handlers for the gateway API.

use super::types::HealthResponse;
use super::AppState;
use crate::error::RelayError;
use crate::logger::{format_exchange, UpstreamExchange};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Relay the upstream model list verbatim.
pub async fn list_models(State(state): State<Arc<AppState>>) -> Result<Response, RelayError> {
    let started = Instant::now();
    let result = state.upstream.fetch_models().await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let url = state.upstream.models_url().unwrap_or_else(|| "<unset>".to_string());

    match result {
        Ok(reply) => {
            tracing::info!(
                "{}",
                format_exchange(
                    &UpstreamExchange {
                        method: "GET",
                        url: &url,
                        status: Some(reply.status),
                        elapsed_ms,
                        body_bytes: reply.body.len(),
                        failure: None,
                    },
                    state.verbosity,
                )
            );

            Ok((
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                reply.body,
            )
                .into_response())
        }
        Err(e) => {
            tracing::warn!(
                kind = e.kind(),
                "{}\n{}",
                format_exchange(
                    &UpstreamExchange {
                        method: "GET",
                        url: &url,
                        status: match &e {
                            RelayError::UpstreamStatus(status) => Some(*status),
                            _ => None,
                        },
                        elapsed_ms,
                        body_bytes: 0,
                        failure: Some(e.kind()),
                    },
                    state.verbosity,
                ),
                e
            );
            Err(e)
        }
    }
}
