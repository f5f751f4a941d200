//! Test fixtures
//!
//! Factory functions for feed items, raw entries and timestamps.
//! Timestamps are expressed as seconds from a fixed base instant.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

use crate::app::dates::format_rfc2822;
use crate::domain::entities::FeedItem;
use crate::domain::ports::RawEntry;

/// 2024-06-01 12:00:00 UTC
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// `base_time() + secs`, at a UTC offset
pub fn ts(secs: i64) -> DateTime<FixedOffset> {
    (base_time() + Duration::seconds(secs)).fixed_offset()
}

/// A stored item published `secs` after the base time
pub fn test_item(link: &str, secs: i64) -> FeedItem {
    FeedItem::new(
        format!("Title for {}", link),
        link,
        format!("Summary of {}", link),
        ts(secs),
    )
}

/// `count` items with links `https://example.com/{prefix}/{i}`, the item
/// with index `i` published `i` minutes after the base time
pub fn test_items(prefix: &str, count: usize) -> Vec<FeedItem> {
    (0..count)
        .map(|i| {
            test_item(
                &format!("https://example.com/{}/{}", prefix, i),
                i as i64 * 60,
            )
        })
        .collect()
}

/// A fetched entry with a `pubDate` `secs` after the base time
pub fn raw_entry(link: &str, secs: i64) -> RawEntry {
    RawEntry {
        title: Some(format!("Fetched {}", link)),
        link: Some(link.to_string()),
        summary: Some(format!("About {}", link)),
        published: None,
        pub_date: Some(format_rfc2822(&ts(secs))),
        updated: None,
    }
}
