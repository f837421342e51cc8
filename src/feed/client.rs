use async_trait::async_trait;
use url::Url;

use super::FeedSource;
use crate::config::FeedConfig;
use crate::error::{AppError, AppResult};
use crate::models::{FeedEvent, FeedResponse};

/// HTTP client for the Neynar-compatible feed API
pub struct FeedClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
    client_id: String,
}

impl FeedClient {
    /// Creates a feed client with the configured request timeout
    pub fn new(config: &FeedConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            client_id: config.client_id.clone(),
        })
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch(&self, fid: u64) -> AppResult<Vec<FeedEvent>> {
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[
                ("feed_type", "filter"),
                ("filter_type", "fids"),
                ("fids", &fid.to_string()),
            ])
            .header("api_key", &self.api_key)
            .header("client_id", &self.client_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamStatus {
                status: response.status().as_u16(),
            });
        }

        let body: FeedResponse = response
            .json()
            .await
            .map_err(|e| AppError::ResponseFormat(format!("Invalid feed body: {}", e)))?;

        Ok(body.casts)
    }
}
