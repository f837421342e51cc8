//! Daily allowance arithmetic and the quota reset countdown.
//!
//! Everything here is a pure function of its inputs; the current instant
//! is always passed in explicitly so the countdown stays testable with
//! fixed clocks.

use chrono::{DateTime, Duration, Utc};

use crate::config::AllowanceConfig;

/// Used/remaining/over-quota figures derived from a sent count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowanceBreakdown {
    pub daily_used: u32,
    pub daily_remaining: u32,
    pub failed_attempts: u32,
}

/// Countdown to the next quota reset, recomputed on every render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetInfo {
    /// Quota still available today
    pub remaining: u32,
    /// Time until the next reset boundary
    pub reset_in: Duration,
}

impl ResetInfo {
    /// Renders the countdown as whole hours and minutes, floored.
    /// A 90 minute gap renders as "1h 30m".
    pub fn countdown(&self) -> String {
        let hours = self.reset_in.num_hours();
        let minutes = self.reset_in.num_minutes() % 60;
        format!("{}h {}m", hours, minutes)
    }
}

/// Derives used/remaining/over-quota figures from today's sent count
pub fn compute_allowance(sent: u32, config: &AllowanceConfig) -> AllowanceBreakdown {
    let daily_used = sent.min(config.daily_quota);

    AllowanceBreakdown {
        daily_used,
        daily_remaining: config.daily_quota - daily_used,
        failed_attempts: sent.saturating_sub(config.daily_quota),
    }
}

/// Computes the countdown to the next reset boundary.
///
/// The boundary is today at `reset_hour_utc:00:00` UTC; if `now` is already
/// past it, the next boundary is tomorrow.
pub fn compute_reset_info(
    now: DateTime<Utc>,
    daily_used: u32,
    config: &AllowanceConfig,
) -> ResetInfo {
    let mut reset_time = now
        .date_naive()
        .and_hms_opt(config.reset_hour_utc, 0, 0)
        .expect("reset hour is validated at config load")
        .and_utc();

    if now > reset_time {
        reset_time = reset_time + Duration::days(1);
    }

    ResetInfo {
        remaining: config.daily_quota.saturating_sub(daily_used),
        reset_in: reset_time - now,
    }
}
