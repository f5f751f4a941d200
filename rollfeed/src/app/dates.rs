//! Timestamp policy for fetched and stored items
//!
//! Dates on the wire are RFC 2822 strings (`Mon, 02 Jan 2006 15:04:05 -0700`).
//! Anything that does not parse falls back to the current time.

use chrono::{DateTime, FixedOffset, Utc};

use crate::domain::ports::RawEntry;

/// Parse an RFC 2822 date, tolerating surrounding whitespace
pub fn parse_rfc2822(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(raw.trim()).ok()
}

const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Format a timestamp for `<pubDate>`, keeping its own offset
pub fn format_rfc2822(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format(PUB_DATE_FORMAT).to_string()
}

/// Resolve the publication time of a freshly fetched entry.
///
/// Tries `published`, then `pubDate`, then `updated`; the first field that
/// parses wins. Falls back to `now` when none is present or none parses.
pub fn resolve_entry_date(entry: &RawEntry, now: DateTime<Utc>) -> DateTime<FixedOffset> {
    [&entry.published, &entry.pub_date, &entry.updated]
        .into_iter()
        .flatten()
        .find_map(|raw| parse_rfc2822(raw))
        .unwrap_or_else(|| now.fixed_offset())
}
