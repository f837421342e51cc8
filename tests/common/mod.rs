//! Common test utilities and helpers
//!
//! This module provides shared fixtures for all tests.

#![allow(dead_code)]

use std::time::Duration;

use chrono::TimeZone;
use chrono::Utc;
use url::Url;

use nutrak::config::{AllowanceConfig, Config, FeedConfig, ObservationWindow};
use nutrak::models::{EventAuthor, FeedEvent};

/// Marker used throughout the tests
pub const MARKER: &str = "\u{1F95C}";

/// February 2025 observation window
pub fn window() -> ObservationWindow {
    ObservationWindow {
        start: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
    }
}

pub fn allowance(daily_quota: u32) -> AllowanceConfig {
    AllowanceConfig {
        daily_quota,
        reset_hour_utc: 11,
    }
}

/// Full config with an unreachable feed URL, for wiring-level tests
pub fn test_config(daily_quota: u32) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        feed: FeedConfig {
            base_url: Url::parse("http://127.0.0.1:9/feed").unwrap(),
            api_key: "test-key".to_string(),
            client_id: "test-client".to_string(),
            timeout: Duration::from_secs(1),
        },
        allowance: allowance(daily_quota),
        window: window(),
        poll_interval: Duration::from_secs(60),
        marker: MARKER.to_string(),
        fid: None,
    }
}

/// Builds a feed event. `parent_fid` makes it a reply to that author.
pub fn event(text: &str, timestamp: &str, author_fid: u64, parent_fid: Option<u64>) -> FeedEvent {
    FeedEvent {
        hash: format!("0x{:08x}", author_fid),
        author: EventAuthor {
            fid: Some(author_fid),
        },
        parent_author: Some(EventAuthor { fid: parent_fid }),
        text: text.to_string(),
        timestamp: timestamp.to_string(),
    }
}

/// A qualifying event inside the February window
pub fn nut_event(author_fid: u64, parent_fid: Option<u64>) -> FeedEvent {
    event(
        &format!("have a {} on me", MARKER),
        "2025-02-10T12:00:00Z",
        author_fid,
        parent_fid,
    )
}
