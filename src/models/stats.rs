use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::AllowanceConfig;
use crate::services::partition::PartitionCounts;

/// Aggregated nut stats for one refresh cycle.
///
/// Invariants: `daily_used = min(sent, quota)`,
/// `failed_attempts = max(0, sent - quota)`,
/// `daily_remaining = quota - daily_used`, `total_points = received`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NutStats {
    pub sent: u32,
    pub received: u32,
    pub failed_attempts: u32,
    pub total_points: u32,
    pub daily_used: u32,
    pub daily_remaining: u32,
}

impl NutStats {
    /// Stats shown before any refresh cycle has completed
    pub fn initial(config: &AllowanceConfig) -> Self {
        Self {
            sent: 0,
            received: 0,
            failed_attempts: 0,
            total_points: 0,
            daily_used: 0,
            daily_remaining: config.daily_quota,
        }
    }

    /// Assembles a snapshot from partition counts and the allowance config
    pub fn from_counts(counts: PartitionCounts, config: &AllowanceConfig) -> Self {
        let breakdown = crate::services::allowance::compute_allowance(counts.sent, config);

        Self {
            sent: counts.sent,
            received: counts.received,
            failed_attempts: breakdown.failed_attempts,
            total_points: counts.received,
            daily_used: breakdown.daily_used,
            daily_remaining: breakdown.daily_remaining,
        }
    }
}

/// Current display state: the latest stats plus refresh bookkeeping.
///
/// Replaced wholesale on every successful refresh; a failed refresh only
/// touches `error` and `loading`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    /// Identity the stats belong to
    pub fid: Option<u64>,
    pub stats: NutStats,
    /// Empty when healthy
    pub error: String,
    /// True while a refresh cycle is in flight
    pub loading: bool,
    pub last_updated: Option<DateTime<Utc>>,
}

impl StatsSnapshot {
    pub fn initial(fid: Option<u64>, config: &AllowanceConfig) -> Self {
        Self {
            fid,
            stats: NutStats::initial(config),
            error: String::new(),
            loading: false,
            last_updated: None,
        }
    }
}
