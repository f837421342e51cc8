use std::sync::Arc;

use chrono::Utc;

use crate::config::{AllowanceConfig, Config, ObservationWindow};
use crate::error::AppResult;
use crate::feed::FeedSource;
use crate::models::{FeedEvent, NutStats};
use crate::services::partition::{partition, Attribution};
use crate::services::window::is_qualifying;
use crate::tracker::StatsState;

/// Orchestrates one refresh cycle: fetch, classify, partition, compute
/// allowance, commit the snapshot.
pub struct StatsAggregator {
    feed: Arc<dyn FeedSource>,
    state: Arc<StatsState>,
    window: ObservationWindow,
    allowance: AllowanceConfig,
    marker: String,
}

impl StatsAggregator {
    pub fn new(feed: Arc<dyn FeedSource>, state: Arc<StatsState>, config: &Config) -> Self {
        Self {
            feed,
            state,
            window: config.window,
            allowance: config.allowance.clone(),
            marker: config.marker.clone(),
        }
    }

    pub fn state(&self) -> &Arc<StatsState> {
        &self.state
    }

    /// Runs a refresh cycle for the identity. On success the snapshot is
    /// replaced and any previous error cleared; on failure the previous
    /// stats are kept and a user-facing message is recorded.
    pub async fn refresh(&self, fid: u64) -> AppResult<NutStats> {
        let token = self.state.begin_refresh();

        match self.collect(fid).await {
            Ok(stats) => {
                self.state.commit_success(token, fid, stats.clone(), Utc::now());
                Ok(stats)
            }
            Err(e) => {
                log::warn!("Refresh cycle for fid {} failed: {}", fid, e);
                self.state.commit_failure(token, fid, e.display_message());
                Err(e)
            }
        }
    }

    async fn collect(&self, fid: u64) -> AppResult<NutStats> {
        let events = self.feed.fetch(fid).await?;
        let total = events.len();

        let qualifying: Vec<FeedEvent> = events
            .into_iter()
            .filter(|e| is_qualifying(e, &self.marker, &self.window))
            .collect();

        log::debug!(
            "fid {}: {} of {} feed events qualify",
            fid,
            qualifying.len(),
            total
        );

        let counts = partition(&qualifying, fid, Attribution::Subtractive);
        Ok(NutStats::from_counts(counts, &self.allowance))
    }
}
