//! Client for the upstream inference router.
//!
//! Only the model listing is relayed: `GET {url}/v1/models` with the
//! master key as a bearer credential. Responses are never cached.
//! A missing URL or master key fails with `NotConfigured` without calling
//! the upstream.

#[cfg(test)]
mod tests;

use crate::config::UpstreamConfig;
use crate::error::RelayError;
use crate::http::create_client_with_timeout;
use axum::body::Bytes;
use reqwest::{header::AUTHORIZATION, Client};
use serde::de::IgnoredAny;
use std::time::Duration;

/// Outcome of a successful upstream call.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Bytes,
}

#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Option<String>,
    master_key: Option<String>,
}

impl UpstreamClient {
    pub fn from_config(config: &UpstreamConfig) -> reqwest::Result<Self> {
        Ok(Self {
            client: create_client_with_timeout(Duration::from_secs(config.timeout_secs))?,
            base_url: config.url.clone(),
            master_key: config.master_key.clone(),
        })
    }

    /// Both the upstream URL and master key are set.
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.master_key.is_some()
    }

    /// Full URL of the upstream model listing, if configured.
    pub fn models_url(&self) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|base| format!("{}/v1/models", base.trim_end_matches('/')))
    }

    /// Fetch the model list, returning the upstream body untouched.
    pub async fn fetch_models(&self) -> Result<UpstreamReply, RelayError> {
        let (Some(url), Some(key)) = (self.models_url(), self.master_key.as_deref()) else {
            return Err(RelayError::NotConfigured);
        };

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<IgnoredAny>(&body)
            .map_err(|e| RelayError::MalformedPayload(e.to_string()))?;

        Ok(UpstreamReply {
            status: status.as_u16(),
            body,
        })
    }
}
