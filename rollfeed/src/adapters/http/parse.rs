//! Feed body parsing
//!
//! Bodies are tried as RSS first, then as Atom. Dates are passed through as
//! strings; Atom timestamps are rendered in RFC 2822 so both formats share
//! one date policy.

use chrono::DateTime;

use crate::app::dates::format_rfc2822;
use crate::domain::ports::RawEntry;
use crate::error::FetchError;

/// Parse an RSS or Atom document into raw entries
pub fn parse_feed(url: &str, body: &[u8]) -> Result<Vec<RawEntry>, FetchError> {
    let rss_err = match rss::Channel::read_from(body) {
        Ok(channel) => return Ok(channel.items().iter().map(entry_from_rss).collect()),
        Err(e) => e,
    };

    match atom_syndication::Feed::read_from(body) {
        Ok(feed) => Ok(feed.entries().iter().map(entry_from_atom).collect()),
        Err(atom_err) => Err(FetchError::Parse {
            url: url.to_string(),
            message: format!("not RSS ({}) or Atom ({})", rss_err, atom_err),
        }),
    }
}

fn entry_from_rss(item: &rss::Item) -> RawEntry {
    let link = item.link().map(str::to_string).or_else(|| {
        item.guid()
            .filter(|guid| guid.is_permalink())
            .map(|guid| guid.value().to_string())
    });
    let pub_date = item.pub_date().map(str::to_string);

    RawEntry {
        title: item.title().map(str::to_string),
        link,
        summary: item.description().map(str::to_string),
        published: pub_date.clone(),
        pub_date,
        updated: item
            .dublin_core_ext()
            .and_then(|dc| dc.dates().first())
            .and_then(|date| DateTime::parse_from_rfc3339(date.trim()).ok())
            .map(|date| format_rfc2822(&date)),
    }
}

fn entry_from_atom(entry: &atom_syndication::Entry) -> RawEntry {
    let links = entry.links();
    let link = links
        .iter()
        .find(|l| l.rel() == "alternate")
        .or_else(|| links.first())
        .map(|l| l.href().to_string());

    let summary = entry
        .summary()
        .map(|s| s.value.clone())
        .or_else(|| entry.content().and_then(|c| c.value()).map(str::to_string));

    let title = Some(entry.title().value.clone()).filter(|t| !t.is_empty());

    // A missing <updated> reads back as the Unix epoch
    let updated = Some(entry.updated())
        .filter(|d| d.timestamp() != 0)
        .map(format_rfc2822);

    RawEntry {
        title,
        link,
        summary,
        published: entry.published().map(format_rfc2822),
        pub_date: None,
        updated,
    }
}
