use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Feed API response body
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    pub casts: Vec<FeedEvent>,
}

/// A single post from the remote feed. Owned by the feed source;
/// the tracker only reads it.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEvent {
    pub hash: String,
    pub author: EventAuthor,
    /// Author of the post this event replies to. The feed sends this
    /// object with a null fid for top-level posts.
    #[serde(default)]
    pub parent_author: Option<EventAuthor>,
    #[serde(default)]
    pub text: String,
    /// Wire timestamp, kept as received. Parsed lazily; a malformed
    /// value excludes the event from counting instead of failing the batch.
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventAuthor {
    pub fid: Option<u64>,
}

impl FeedEvent {
    /// Parses the wire timestamp. `None` means the event cannot be
    /// classified and is skipped.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Fid of the post's parent author, when the event is a reply
    pub fn parent_fid(&self) -> Option<u64> {
        self.parent_author.as_ref().and_then(|a| a.fid)
    }
}
