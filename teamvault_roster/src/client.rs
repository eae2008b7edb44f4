use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::PasteFetcher;
use crate::html::html_to_text;

/// Paste fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout (seconds)
    #[serde(default = "FetchConfig::default_timeout")]
    pub timeout: u64,

    /// User-Agent header
    #[serde(default = "FetchConfig::default_user_agent")]
    pub user_agent: String,

    /// Maximum response size (bytes)
    #[serde(default = "FetchConfig::default_max_size")]
    pub max_size: usize,
}

impl FetchConfig {
    const fn default_timeout() -> u64 {
        10
    }

    fn default_user_agent() -> String {
        "Mozilla/5.0 (compatible; teamvault/1.0)".to_string()
    }

    const fn default_max_size() -> usize {
        1_000_000 // 1MB
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Self::default_timeout(),
            user_agent: Self::default_user_agent(),
            max_size: Self::default_max_size(),
        }
    }
}

/// HTTP client for team-export pages.
pub struct PasteClient {
    client: Client,
    config: FetchConfig,
}

impl PasteClient {
    pub fn new(config: FetchConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl PasteFetcher for PasteClient {
    async fn fetch_text(&self, url: &str) -> anyhow::Result<String> {
        let parsed = url::Url::parse(url).context("invalid URL")?;
        anyhow::ensure!(
            matches!(parsed.scheme(), "http" | "https"),
            "unsupported scheme: {}",
            parsed.scheme()
        );

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.config.user_agent)
            .header("Accept", "text/html, text/plain")
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        anyhow::ensure!(status.is_success(), "non-success status {status} from {url}");

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("failed to read response from {url}"))?;
        anyhow::ensure!(
            bytes.len() <= self.config.max_size,
            "response too large: {} bytes (max: {})",
            bytes.len(),
            self.config.max_size
        );

        Ok(html_to_text(&bytes))
    }
}
