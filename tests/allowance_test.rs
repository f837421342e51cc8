//! Unit tests for the allowance calculator
//!
//! Covers the used/remaining/over-quota arithmetic and the reset
//! countdown, including the rollover to tomorrow's boundary.

mod common;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rstest::rstest;

use common::allowance;
use nutrak::services::allowance::{compute_allowance, compute_reset_info};

// =============================================================================
// Allowance Breakdown Tests
// =============================================================================

#[rstest]
#[case(0, 5, 0, 5, 0)]
#[case(3, 5, 3, 2, 0)]
#[case(5, 5, 5, 0, 0)]
#[case(7, 5, 5, 0, 2)]
#[case(100, 5, 5, 0, 95)]
#[case(4, 0, 0, 0, 4)]
fn test_allowance_breakdown(
    #[case] sent: u32,
    #[case] quota: u32,
    #[case] used: u32,
    #[case] remaining: u32,
    #[case] failed: u32,
) {
    let breakdown = compute_allowance(sent, &allowance(quota));

    assert_eq!(breakdown.daily_used, used);
    assert_eq!(breakdown.daily_remaining, remaining);
    assert_eq!(breakdown.failed_attempts, failed);
}

// =============================================================================
// Reset Countdown Tests
// =============================================================================

#[test]
fn test_reset_before_todays_boundary() {
    // 10:59 UTC with an 11:00 reset: boundary is still today
    let now = Utc.with_ymd_and_hms(2025, 2, 10, 10, 59, 0).unwrap();
    let info = compute_reset_info(now, 2, &allowance(5));

    assert_eq!(info.remaining, 3);
    assert_eq!(info.countdown(), "0h 1m");
}

#[test]
fn test_reset_rolls_over_to_tomorrow() {
    // 11:01 UTC with an 11:00 reset: boundary rolled to tomorrow
    let now = Utc.with_ymd_and_hms(2025, 2, 10, 11, 1, 0).unwrap();
    let info = compute_reset_info(now, 5, &allowance(5));

    assert_eq!(info.remaining, 0);
    assert_eq!(info.countdown(), "23h 59m");
}

#[test]
fn test_reset_exactly_at_boundary() {
    // At the boundary itself, now > reset_time is false: no rollover
    let now = Utc.with_ymd_and_hms(2025, 2, 10, 11, 0, 0).unwrap();
    let info = compute_reset_info(now, 0, &allowance(5));

    assert_eq!(info.countdown(), "0h 0m");
}

#[test]
fn test_countdown_floors_partial_minutes() {
    // 89 minutes and 59 seconds renders as 1h 29m, not 1h 30m
    let now = Utc.with_ymd_and_hms(2025, 2, 10, 9, 30, 1).unwrap();
    let info = compute_reset_info(now, 1, &allowance(5));

    assert_eq!(info.countdown(), "1h 29m");
}

#[test]
fn test_reset_is_pure_and_restateless() {
    let now = Utc.with_ymd_and_hms(2025, 2, 10, 8, 0, 0).unwrap();
    let a = compute_reset_info(now, 2, &allowance(5));
    let b = compute_reset_info(now, 2, &allowance(5));

    assert_eq!(a, b);

    // One second later is a different, shorter countdown
    let later = compute_reset_info(now + chrono::Duration::seconds(60), 2, &allowance(5));
    assert!(later.reset_in < a.reset_in);
}

// =============================================================================
// Algebraic Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_used_plus_remaining_equals_quota(sent in 0u32..10_000, quota in 0u32..10_000) {
        let breakdown = compute_allowance(sent, &allowance(quota));
        prop_assert_eq!(breakdown.daily_used + breakdown.daily_remaining, quota);
    }

    #[test]
    fn prop_no_failures_within_quota(quota in 0u32..10_000, slack in 0u32..10_000) {
        let sent = quota.saturating_sub(slack);
        let breakdown = compute_allowance(sent, &allowance(quota));
        prop_assert_eq!(breakdown.failed_attempts, 0);
    }

    #[test]
    fn prop_overflow_is_counted_as_failures(quota in 0u32..10_000, over in 1u32..10_000) {
        let breakdown = compute_allowance(quota + over, &allowance(quota));
        prop_assert_eq!(breakdown.failed_attempts, over);
        prop_assert_eq!(breakdown.daily_used, quota);
    }
}
