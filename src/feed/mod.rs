pub mod client;

pub use client::FeedClient;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::FeedEvent;

/// Source of raw feed events for an identity.
///
/// The aggregator only depends on this trait so tests can inject a fake
/// feed instead of the remote API.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetches the identity's raw feed slice
    async fn fetch(&self, fid: u64) -> AppResult<Vec<FeedEvent>>;
}
