//! Owned container for the current stats snapshot.
//!
//! Update contract: a successful refresh replaces the snapshot wholesale
//! and clears the error; a failed refresh records the error and leaves the
//! previous stats untouched. Commits carry a monotonic refresh token so a
//! slow cycle can never overwrite the result of a newer one, and a commit
//! for an identity that is no longer tracked is discarded.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::config::AllowanceConfig;
use crate::models::{NutStats, StatsSnapshot};

pub struct StatsState {
    tx: watch::Sender<StatsSnapshot>,
    identity: watch::Receiver<Option<u64>>,
    allowance: AllowanceConfig,
    /// Last refresh token handed out
    next_token: AtomicU64,
    /// Highest token that has committed (or been invalidated)
    committed: AtomicU64,
}

impl StatsState {
    pub fn new(identity: watch::Receiver<Option<u64>>, allowance: AllowanceConfig) -> Self {
        let initial = StatsSnapshot::initial(*identity.borrow(), &allowance);
        let (tx, _rx) = watch::channel(initial);

        Self {
            tx,
            identity,
            allowance,
            next_token: AtomicU64::new(0),
            committed: AtomicU64::new(0),
        }
    }

    /// Observable interface for presentation code
    pub fn subscribe(&self) -> watch::Receiver<StatsSnapshot> {
        self.tx.subscribe()
    }

    /// Current snapshot, cloned
    pub fn snapshot(&self) -> StatsSnapshot {
        self.tx.borrow().clone()
    }

    /// Marks a refresh cycle as in flight and returns its commit token
    pub fn begin_refresh(&self) -> u64 {
        let token = self.next_token.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_modify(|snapshot| snapshot.loading = true);
        token
    }

    /// Replaces the snapshot with freshly aggregated stats.
    /// Discarded if a newer cycle already committed or the tracked
    /// identity changed while the fetch was in flight.
    pub fn commit_success(&self, token: u64, fid: u64, stats: NutStats, at: DateTime<Utc>) {
        if !self.try_claim(token, fid) {
            return;
        }

        self.tx.send_modify(|snapshot| {
            snapshot.fid = Some(fid);
            snapshot.stats = stats;
            snapshot.error.clear();
            snapshot.loading = false;
            snapshot.last_updated = Some(at);
        });
    }

    /// Records a failed refresh cycle. The previous stats and
    /// last-updated instant are preserved.
    pub fn commit_failure(&self, token: u64, fid: u64, message: String) {
        if !self.try_claim(token, fid) {
            return;
        }

        self.tx.send_modify(|snapshot| {
            snapshot.error = message;
            snapshot.loading = false;
        });
    }

    /// Replaces the snapshot with the initial state for a new identity and
    /// invalidates every refresh cycle started before now.
    pub fn reset(&self, fid: Option<u64>) {
        let ceiling = self.next_token.load(Ordering::SeqCst);
        self.committed.fetch_max(ceiling, Ordering::SeqCst);

        self.tx
            .send_replace(StatsSnapshot::initial(fid, &self.allowance));
    }

    fn try_claim(&self, token: u64, fid: u64) -> bool {
        if *self.identity.borrow() != Some(fid) {
            log::debug!("Discarding refresh for superseded fid {}", fid);
            return false;
        }

        if self.committed.fetch_max(token, Ordering::SeqCst) >= token {
            log::debug!("Discarding stale refresh (token {})", token);
            return false;
        }

        true
    }
}
