use crate::models::FeedEvent;

/// Sent/received counts over one batch of qualifying events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionCounts {
    pub sent: u32,
    pub received: u32,
}

/// How outgoing actions are attributed to the identity.
///
/// `Subtractive` counts everything qualifying that is not received as
/// sent, without checking the author. This overcounts when third-party
/// events land in the same feed slice.
/// `ByAuthor` counts only events actually authored by the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attribution {
    #[default]
    Subtractive,
    ByAuthor,
}

/// Splits a batch of qualifying events into received (someone else's
/// qualifying action directed at a post of `fid`) and sent counts.
pub fn partition(events: &[FeedEvent], fid: u64, attribution: Attribution) -> PartitionCounts {
    let received = events
        .iter()
        .filter(|e| e.parent_fid() == Some(fid))
        .count() as u32;

    let sent = match attribution {
        Attribution::Subtractive => events.len() as u32 - received,
        Attribution::ByAuthor => events
            .iter()
            .filter(|e| e.author.fid == Some(fid) && e.parent_fid() != Some(fid))
            .count() as u32,
    };

    PartitionCounts { sent, received }
}
