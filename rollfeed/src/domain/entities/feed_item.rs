//! Feed item domain entity
//!
//! The one record type shared by the master feed and the daily digest.
//! Items are created once, when a source entry is first seen, and never
//! modified afterwards.

use chrono::{DateTime, FixedOffset};

/// Title used when neither the source entry nor the stored item has one
pub const PLACEHOLDER_TITLE: &str = "No Title";

/// A single aggregated item
///
/// `link` is the deduplication key. `published_at` keeps the offset it was
/// published with so that `pubDate` round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published_at: DateTime<FixedOffset>,
}

impl FeedItem {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
        published_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: description.into(),
            published_at,
        }
    }
}

/// Sort newest first. The sort is stable: items with equal timestamps keep
/// their relative input order.
pub fn sort_newest_first(items: &mut [FeedItem]) {
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}
