use chrono::{DateTime, Utc};

use crate::config::ObservationWindow;
use crate::models::FeedEvent;

/// Returns true iff the instant falls inside the observation window.
/// Both bounds are inclusive.
pub fn is_in_window(instant: DateTime<Utc>, window: &ObservationWindow) -> bool {
    window.start <= instant && instant <= window.end
}

/// Returns true iff the event counts toward the stats: its text contains
/// the marker token (substring match, repeated markers still count once)
/// and its timestamp falls inside the observation window.
///
/// An unparsable timestamp excludes the event instead of failing the batch.
pub fn is_qualifying(event: &FeedEvent, marker: &str, window: &ObservationWindow) -> bool {
    if !event.text.contains(marker) {
        return false;
    }

    match event.instant() {
        Some(instant) => is_in_window(instant, window),
        None => {
            log::debug!("Skipping event {} with unparsable timestamp", event.hash);
            false
        }
    }
}
