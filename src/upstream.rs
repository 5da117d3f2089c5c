use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::UpstreamConfig;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Upstream request failed: {0}")]
    Transport(String),
    #[error("Upstream returned HTTP {0}")]
    Status(u16),
    #[error("Upstream returned invalid JSON: {0}")]
    Decode(String),
}

/// Source of raw catalog documents.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Value, UpstreamError>;
}

/// The remote movie API over HTTP.
pub struct HttpUpstream {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl HttpUpstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| UpstreamError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
    async fn fetch(&self, url: &str) -> Result<Value, UpstreamError> {
        debug!(url = %url, "Fetching from upstream");

        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(ref key) = self.api_key {
            request = request.header("X-API-KEY", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}
