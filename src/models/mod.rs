pub mod event;
pub mod stats;

pub use event::{EventAuthor, FeedEvent, FeedResponse};
pub use stats::{NutStats, StatsSnapshot};
