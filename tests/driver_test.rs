//! Tests for the polling driver
//!
//! Run on a paused tokio clock so interval ticks can be driven
//! deterministically.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use common::{allowance, nut_event, test_config};
use nutrak::error::AppResult;
use nutrak::feed::FeedSource;
use nutrak::models::FeedEvent;
use nutrak::services::StatsAggregator;
use nutrak::tracker::{driver, StatsState};

const FID: u64 = 42;
const PERIOD: Duration = Duration::from_secs(60);

/// Feed that counts how often it was asked
#[derive(Default)]
struct CountingFeed {
    calls: AtomicUsize,
}

#[async_trait]
impl FeedSource for CountingFeed {
    async fn fetch(&self, _fid: u64) -> AppResult<Vec<FeedEvent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![nut_event(FID, None)])
    }
}

fn spawn_driver(
    initial_fid: Option<u64>,
) -> (
    Arc<CountingFeed>,
    watch::Sender<Option<u64>>,
    Arc<StatsState>,
    tokio::task::JoinHandle<()>,
) {
    let feed = Arc::new(CountingFeed::default());
    let (identity_tx, identity_rx) = watch::channel(initial_fid);
    let state = Arc::new(StatsState::new(identity_rx.clone(), allowance(5)));
    let aggregator = Arc::new(StatsAggregator::new(
        feed.clone(),
        state.clone(),
        &test_config(5),
    ));

    let task = tokio::spawn(driver::run(aggregator, identity_rx, PERIOD));
    (feed, identity_tx, state, task)
}

#[tokio::test(start_paused = true)]
async fn test_no_identity_means_no_fetches() {
    let (feed, _identity, _state, task) = spawn_driver(None);

    tokio::time::sleep(PERIOD * 5).await;

    assert_eq!(feed.calls.load(Ordering::SeqCst), 0);
    task.abort();
}

#[tokio::test(start_paused = true)]
async fn test_polls_on_cadence_with_identity() {
    let (feed, _identity, state, task) = spawn_driver(Some(FID));

    // First tick fires immediately, then one per period
    tokio::time::sleep(PERIOD * 3 + Duration::from_millis(10)).await;

    let calls = feed.calls.load(Ordering::SeqCst);
    assert!((3..=5).contains(&calls), "unexpected fetch count {}", calls);
    assert_eq!(state.snapshot().stats.sent, 1);
    task.abort();
}

#[tokio::test(start_paused = true)]
async fn test_installing_identity_starts_polling() {
    let (feed, identity, state, task) = spawn_driver(None);

    tokio::time::sleep(PERIOD * 2).await;
    assert_eq!(feed.calls.load(Ordering::SeqCst), 0);

    identity.send(Some(FID)).unwrap();
    // Interval restarts on identity change and fires immediately
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(feed.calls.load(Ordering::SeqCst) >= 1);
    assert_eq!(state.snapshot().fid, Some(FID));
    task.abort();
}

#[tokio::test(start_paused = true)]
async fn test_clearing_identity_pauses_polling_and_resets_snapshot() {
    let (feed, identity, state, task) = spawn_driver(Some(FID));

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(feed.calls.load(Ordering::SeqCst) >= 1);

    identity.send(None).unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let calls_after_clear = feed.calls.load(Ordering::SeqCst);

    tokio::time::sleep(PERIOD * 3).await;
    assert_eq!(feed.calls.load(Ordering::SeqCst), calls_after_clear);

    let snapshot = state.snapshot();
    assert_eq!(snapshot.fid, None);
    assert_eq!(snapshot.stats.sent, 0);
    task.abort();
}

#[tokio::test(start_paused = true)]
async fn test_driver_stops_when_identity_channel_closes() {
    let (_feed, identity, _state, task) = spawn_driver(Some(FID));

    tokio::time::sleep(Duration::from_millis(10)).await;
    drop(identity);
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(task.is_finished());
}
