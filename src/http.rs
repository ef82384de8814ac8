//! Shared HTTP client factory.
//!
//! Every outbound client gets a bounded timeout.

use reqwest::Client;
use std::time::Duration;

/// Default timeout for upstream calls (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Create a new HTTP client with the default timeout.
pub fn create_client() -> reqwest::Result<Client> {
    create_client_with_timeout(DEFAULT_TIMEOUT)
}

/// Create a new HTTP client with a custom timeout.
pub fn create_client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("ai-gateway/", env!("CARGO_PKG_VERSION")))
        .build()
}
