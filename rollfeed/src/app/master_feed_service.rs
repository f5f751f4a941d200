//! Master feed service
//!
//! Maintains the rolling master document: every run merges newly fetched
//! entries into the stored items, drops links already seen, sorts newest
//! first and trims to a fixed size before rewriting the whole document.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::dates::{parse_rfc2822, resolve_entry_date};
use crate::domain::entities::feed_item::sort_newest_first;
use crate::domain::entities::{ChannelInfo, FeedItem, PLACEHOLDER_TITLE};
use crate::domain::ports::{Clock, FeedDocumentStore, FeedSource, RawEntry, StoredEntry};
use crate::error::StoreError;

/// What one master update did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Sources attempted
    pub sources: usize,
    /// Sources skipped because fetching or parsing failed
    pub failed_sources: usize,
    /// Items with links not seen before
    pub new_items: usize,
    /// Items written to the master document
    pub retained: usize,
    /// Items dropped by the size bound
    pub trimmed: usize,
}

/// Service for updating the master feed
pub struct MasterFeedService<D, S, C>
where
    D: FeedDocumentStore,
    S: FeedSource,
    C: Clock,
{
    document: Arc<D>,
    source: Arc<S>,
    clock: Arc<C>,
    channel: ChannelInfo,
    max_items: usize,
}

impl<D, S, C> MasterFeedService<D, S, C>
where
    D: FeedDocumentStore,
    S: FeedSource,
    C: Clock,
{
    pub fn new(
        document: Arc<D>,
        source: Arc<S>,
        clock: Arc<C>,
        channel: ChannelInfo,
        max_items: usize,
    ) -> Self {
        Self {
            document,
            source,
            clock,
            channel,
            max_items,
        }
    }

    /// Load the stored master items in document order.
    /// A missing document loads as empty.
    pub async fn load(&self) -> Result<Vec<FeedItem>, StoreError> {
        match self.document.read().await? {
            Some(entries) => Ok(items_from_document(entries, self.clock.now())),
            None => Ok(Vec::new()),
        }
    }

    /// Fetch every source in order, merge new entries into the stored
    /// items and rewrite the master document.
    ///
    /// A failing source is logged and skipped. Only a failure to read or
    /// write the document itself is returned as an error.
    pub async fn update(&self, sources: &[String]) -> Result<UpdateSummary, StoreError> {
        tracing::info!("Updating master feed from {} sources", sources.len());

        let existing = dedupe_by_link(self.load().await?);
        let mut seen: HashSet<String> = existing.iter().map(|i| i.link.clone()).collect();
        let mut new_items = Vec::new();
        let mut failed_sources = 0;

        for url in sources {
            match self.source.fetch(url).await {
                Ok(entries) => {
                    let before = new_items.len();
                    let now = self.clock.now();
                    new_items.extend(
                        entries
                            .into_iter()
                            .filter_map(|entry| accept_entry(entry, &mut seen, now)),
                    );
                    tracing::debug!("{}: {} new items", url, new_items.len() - before);
                }
                Err(e) => {
                    failed_sources += 1;
                    tracing::warn!("Error fetching {}: {}", url, e);
                }
            }
        }

        let new_count = new_items.len();
        let mut all_items = existing;
        all_items.extend(new_items);
        sort_newest_first(&mut all_items);

        let trimmed = all_items.len().saturating_sub(self.max_items);
        all_items.truncate(self.max_items);

        self.document.write(&self.channel, &all_items).await?;

        let summary = UpdateSummary {
            sources: sources.len(),
            failed_sources,
            new_items: new_count,
            retained: all_items.len(),
            trimmed,
        };
        tracing::info!(
            "Master feed updated with {} items ({} new, {} trimmed, {} sources failed)",
            summary.retained,
            summary.new_items,
            summary.trimmed,
            summary.failed_sources
        );

        Ok(summary)
    }
}

/// Turn a fetched entry into a new item, unless its link is empty or
/// already seen. Accepted links are added to `seen`.
fn accept_entry(
    entry: RawEntry,
    seen: &mut HashSet<String>,
    now: DateTime<Utc>,
) -> Option<FeedItem> {
    let link = entry.link.as_deref().map(str::trim).unwrap_or_default();
    if link.is_empty() || !seen.insert(link.to_string()) {
        return None;
    }

    let published_at = resolve_entry_date(&entry, now);
    Some(FeedItem::new(
        entry.title.unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
        link,
        entry.summary.unwrap_or_default(),
        published_at,
    ))
}

/// Convert stored document entries into items.
///
/// An unparseable or missing `pubDate` becomes `now`, which moves that item
/// to the top of the ordering on every load until it is trimmed out.
/// Entries without a link are dropped.
pub(crate) fn items_from_document(entries: Vec<StoredEntry>, now: DateTime<Utc>) -> Vec<FeedItem> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let Some(link) = entry.link.filter(|l| !l.trim().is_empty()) else {
                tracing::warn!(
                    "Dropping stored item without link: {}",
                    entry.title.as_deref().unwrap_or(PLACEHOLDER_TITLE)
                );
                return None;
            };

            let published_at = match entry.pub_date.as_deref().and_then(parse_rfc2822) {
                Some(t) => t,
                None => {
                    tracing::warn!(
                        "Stored item {} has unreadable pubDate {:?}, using current time",
                        link,
                        entry.pub_date
                    );
                    now.fixed_offset()
                }
            };

            Some(FeedItem::new(
                entry.title.unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
                link.trim(),
                entry.description.unwrap_or_default(),
                published_at,
            ))
        })
        .collect()
}

/// Keep the first item for each link
fn dedupe_by_link(items: Vec<FeedItem>) -> Vec<FeedItem> {
    let mut seen = HashSet::new();
    let before = items.len();
    let items: Vec<FeedItem> = items
        .into_iter()
        .filter(|item| seen.insert(item.link.clone()))
        .collect();

    if items.len() < before {
        tracing::debug!("Dropped {} duplicate stored items", before - items.len());
    }
    items
}
