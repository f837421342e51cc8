//! Fixed-cadence refresh loop.
//!
//! One cycle runs at a time: the next tick is not taken until the current
//! refresh has completed, so overlapping fetches cannot commit out of
//! order. Identity changes re-arm the interval and reset the snapshot;
//! with no identity installed the loop idles without fetching.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::services::StatsAggregator;

fn new_ticker(period: Duration) -> Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Runs the polling loop until the identity channel closes or the task
/// is aborted. Results of fetches in flight when the task stops are
/// dropped with it.
pub async fn run(
    aggregator: Arc<StatsAggregator>,
    mut identity: watch::Receiver<Option<u64>>,
    period: Duration,
) {
    let mut ticker = new_ticker(period);

    loop {
        tokio::select! {
            biased;

            changed = identity.changed() => {
                if changed.is_err() {
                    log::info!("Identity channel closed, stopping polling loop");
                    break;
                }

                let fid = *identity.borrow_and_update();
                aggregator.state().reset(fid);

                match fid {
                    Some(fid) => log::info!("Now tracking fid {}", fid),
                    None => log::info!("Identity cleared, polling paused"),
                }

                // Fresh interval; its first tick fires immediately
                ticker = new_ticker(period);
            }

            _ = ticker.tick() => {
                let fid = *identity.borrow();
                if let Some(fid) = fid {
                    // Errors are already recorded on the snapshot; the loop
                    // keeps scheduling future attempts regardless.
                    let _ = aggregator.refresh(fid).await;
                }
            }
        }
    }
}
