// Collectors fetch category pages and turn them into job listings.

pub mod remoteok;
pub mod runner;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::AppError;

/// Retrieves raw markup for one category page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `{base_url}{category}` and return the response body.
    async fn fetch(&self, category: &str) -> Result<String, AppError>;
}

/// Fetches pages over HTTP with a fixed client identifier. No retries.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn category_url(&self, category: &str) -> String {
        format!("{}{category}", self.base_url)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, category: &str) -> Result<String, AppError> {
        let url = self.category_url(category);
        let fetch_error = |reason: String| AppError::Fetch {
            category: category.to_string(),
            reason,
        };

        tracing::info!("Scraping {url}");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_error(format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(fetch_error(format!("{url} returned {}", resp.status())));
        }

        resp.text()
            .await
            .map_err(|e| fetch_error(format!("failed to read body: {e}")))
    }
}
