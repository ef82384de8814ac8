//! Response types for the gateway API.

use serde::Serialize;

/// Name reported by the health check.
pub const SERVICE_NAME: &str = "ai-gateway-backend";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            service: SERVICE_NAME,
        }
    }
}
