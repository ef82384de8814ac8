//! Catalog client: loads the model list from a gateway and renders it.
//!
//! A display session issues exactly one fetch. Failures are logged and
//! leave an empty catalog; nothing is retried or shown to the user.

use crate::http::create_client;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;

/// One model as listed by the gateway. Only `id` is used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
}

/// Gateway model list. A missing or null `data` means no models.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub data: Option<Vec<ModelDescriptor>>,
}

/// State of one display session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogState {
    pub loading: bool,
    pub models: Vec<ModelDescriptor>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            loading: true,
            models: Vec::new(),
        }
    }
}

impl CatalogState {
    /// Settle the session with the outcome of its fetch.
    pub fn settle(&mut self, outcome: Result<ModelList, CatalogError>) {
        match outcome {
            Ok(list) => self.models = list.data.unwrap_or_default(),
            Err(e) => {
                tracing::error!("Failed to load models: {}", e);
                self.models = Vec::new();
            }
        }
        self.loading = false;
    }

    /// Model ids in display order.
    pub fn model_ids(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.id.as_str()).collect()
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Request(reqwest::Error),
    Status(u16),
    Decode(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(e) => write!(f, "Request failed: {}", e),
            Self::Status(status) => write!(f, "Gateway returned status {}", status),
            Self::Decode(msg) => write!(f, "Invalid model list: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

pub struct CatalogClient {
    client: Client,
    gateway_url: String,
}

impl CatalogClient {
    pub fn new(gateway_url: &str) -> reqwest::Result<Self> {
        Ok(Self {
            client: create_client()?,
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the model list from `GET {gateway}/api/models`.
    pub async fn fetch(&self) -> Result<ModelList, CatalogError> {
        let url = format!("{}/api/models", self.gateway_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(CatalogError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(CatalogError::Request)?;
        serde_json::from_slice(&body).map_err(|e| CatalogError::Decode(e.to_string()))
    }

    /// Run one display session: start loading, fetch once, settle.
    pub async fn mount(&self) -> CatalogState {
        let mut state = CatalogState::default();
        state.settle(self.fetch().await);
        state
    }
}

/// Render the catalog as text cards.
pub fn render(state: &CatalogState) -> String {
    if state.loading {
        return "Available Models\n  Loading...".to_string();
    }

    let mut out = String::from("Available Models");
    for model in &state.models {
        out.push_str(&format!("\n  [{}]\n    Ready for inference", model.id));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn gateway_returning(status: usize, body: &str) -> (mockito::ServerGuard, mockito::Mock) {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/models")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;
        (server, mock)
    }

    #[tokio::test]
    async fn mount_keeps_models_in_upstream_order() {
        let (server, mock) =
            gateway_returning(200, r#"{"data":[{"id":"gpt-4"},{"id":"claude-3"}]}"#).await;

        let state = CatalogClient::new(&server.url()).unwrap().mount().await;

        mock.assert_async().await;
        assert!(!state.loading);
        assert_eq!(state.model_ids(), vec!["gpt-4", "claude-3"]);
    }

    #[tokio::test]
    async fn mount_defaults_missing_data_to_empty() {
        let (server, _mock) = gateway_returning(200, r#"{"object":"list"}"#).await;

        let state = CatalogClient::new(&server.url()).unwrap().mount().await;

        assert!(!state.loading);
        assert!(state.models.is_empty());
    }

    #[tokio::test]
    async fn mount_treats_null_data_as_empty() {
        let (server, _mock) = gateway_returning(200, r#"{"data":null}"#).await;

        let state = CatalogClient::new(&server.url()).unwrap().mount().await;

        assert!(state.models.is_empty());
    }

    #[tokio::test]
    async fn mount_clears_loading_on_error_status() {
        let (server, _mock) =
            gateway_returning(500, r#"{"error":"Failed to fetch models"}"#).await;

        let state = CatalogClient::new(&server.url()).unwrap().mount().await;

        assert_eq!(
            state,
            CatalogState {
                loading: false,
                models: vec![]
            }
        );
    }

    #[tokio::test]
    async fn mount_clears_loading_when_fetch_rejects() {
        let client = CatalogClient::new("http://127.0.0.1:1").unwrap();

        let state = client.mount().await;

        assert!(!state.loading);
        assert!(state.models.is_empty());
    }

    #[tokio::test]
    async fn fetch_reports_status_errors() {
        let (server, _mock) = gateway_returning(502, "{}").await;

        let err = CatalogClient::new(&server.url()).unwrap().fetch().await.unwrap_err();

        assert!(matches!(err, CatalogError::Status(502)));
    }

    #[test]
    fn settle_replaces_previous_models_on_error() {
        let mut state = CatalogState {
            loading: true,
            models: vec![ModelDescriptor { id: "stale".to_string() }],
        };

        state.settle(Err(CatalogError::Decode("bad".to_string())));

        assert_eq!(state, CatalogState { loading: false, models: vec![] });
    }

    #[test]
    fn render_shows_placeholder_while_loading() {
        let output = render(&CatalogState::default());

        assert!(output.contains("Loading..."));
        assert!(!output.contains("Ready for inference"));
    }

    #[test]
    fn render_shows_one_card_per_model() {
        let state = CatalogState {
            loading: false,
            models: vec![
                ModelDescriptor { id: "gpt-4".to_string() },
                ModelDescriptor { id: "claude-3".to_string() },
            ],
        };

        let output = render(&state);

        assert_eq!(
            output,
            "Available Models\n  [gpt-4]\n    Ready for inference\n  [claude-3]\n    Ready for inference"
        );
    }

    #[test]
    fn render_empty_catalog_has_no_cards() {
        let state = CatalogState {
            loading: false,
            models: vec![],
        };

        assert_eq!(render(&state), "Available Models");
    }
}
