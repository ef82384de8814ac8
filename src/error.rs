//! Relay error handling.
//!
//! Upstream failures are classified for diagnostics, but every kind is
//! reported to callers with the same response shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Public message for any failed model listing.
pub const FETCH_MODELS_FAILED: &str = "Failed to fetch models";

/// Why a relay to the upstream router failed.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayError {
    /// Upstream URL or master key is not configured.
    NotConfigured,
    /// Connection or protocol failure before a response arrived.
    Transport(String),
    /// The outbound call exceeded its timeout.
    Timeout,
    /// Upstream answered with a non-success status.
    UpstreamStatus(u16),
    /// Upstream body was not valid JSON.
    MalformedPayload(String),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "Upstream URL or master key not configured"),
            Self::Transport(msg) => write!(f, "Upstream request failed: {}", msg),
            Self::Timeout => write!(f, "Upstream request timed out"),
            Self::UpstreamStatus(status) => write!(f, "Upstream returned status {}", status),
            Self::MalformedPayload(msg) => write!(f, "Malformed upstream payload: {}", msg),
        }
    }
}

impl std::error::Error for RelayError {}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::MalformedPayload(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

impl RelayError {
    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotConfigured => "not_configured",
            Self::Transport(_) => "transport",
            Self::Timeout => "timeout",
            Self::UpstreamStatus(_) => "upstream_status",
            Self::MalformedPayload(_) => "malformed_payload",
        }
    }

    /// HTTP status reported to the caller. Identical for every kind.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Error response body, `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorBody {
                error: FETCH_MODELS_FAILED,
            }),
        )
            .into_response()
    }
}
