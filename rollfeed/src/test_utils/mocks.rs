//! Mock implementations of port traits

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::app::dates::format_rfc2822;
use crate::domain::entities::{ChannelInfo, FeedItem, Watermark};
use crate::domain::ports::{
    Clock, FeedDocumentStore, FeedSource, RawEntry, StoredEntry, WatermarkStore,
};
use crate::error::{FetchError, StoreError};

// ============================================================================
// In-Memory Feed Document
// ============================================================================

/// Feed document held in memory. Writes store items the way the RSS
/// adapter would serialize them, so dates go through `pubDate` formatting.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    entries: Arc<RwLock<Option<Vec<StoredEntry>>>>,
    channel: Arc<RwLock<Option<ChannelInfo>>>,
    writes: Arc<RwLock<usize>>,
    fail_writes: bool,
}

impl InMemoryDocumentStore {
    /// A document that does not exist yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with raw stored entries
    pub fn with_entries(self, entries: Vec<StoredEntry>) -> Self {
        *self.entries.write().unwrap() = Some(entries);
        self
    }

    /// Pre-populate with items as if a previous run had written them
    pub fn with_items(self, items: &[FeedItem]) -> Self {
        self.set_items(items);
        self
    }

    /// Replace the stored items, e.g. between two runs
    pub fn set_items(&self, items: &[FeedItem]) {
        *self.entries.write().unwrap() = Some(items.iter().map(to_stored).collect());
    }

    /// Make every write fail with an I/O error
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn exists(&self) -> bool {
        self.entries.read().unwrap().is_some()
    }

    pub fn entries(&self) -> Vec<StoredEntry> {
        self.entries.read().unwrap().clone().unwrap_or_default()
    }

    pub fn links(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| e.link)
            .collect()
    }

    pub fn channel(&self) -> Option<ChannelInfo> {
        self.channel.read().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.read().unwrap()
    }
}

fn to_stored(item: &FeedItem) -> StoredEntry {
    StoredEntry {
        title: Some(item.title.clone()),
        link: Some(item.link.clone()),
        description: Some(item.description.clone()),
        pub_date: Some(format_rfc2822(&item.published_at)),
    }
}

#[async_trait]
impl FeedDocumentStore for InMemoryDocumentStore {
    async fn read(&self) -> Result<Option<Vec<StoredEntry>>, StoreError> {
        Ok(self.entries.read().unwrap().clone())
    }

    async fn write(&self, channel: &ChannelInfo, items: &[FeedItem]) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only document",
            )));
        }

        *self.entries.write().unwrap() = Some(items.iter().map(to_stored).collect());
        *self.channel.write().unwrap() = Some(channel.clone());
        *self.writes.write().unwrap() += 1;
        Ok(())
    }
}

// ============================================================================
// In-Memory Watermark Store
// ============================================================================

#[derive(Default)]
pub struct InMemoryWatermarkStore {
    current: Arc<RwLock<Watermark>>,
    history: Arc<RwLock<Vec<Watermark>>>,
    fail_saves: bool,
}

impl InMemoryWatermarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_watermark(self, watermark: Watermark) -> Self {
        *self.current.write().unwrap() = watermark;
        self
    }

    /// Make every save fail, as if the state file were not writable
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn current(&self) -> Watermark {
        *self.current.read().unwrap()
    }

    /// Every watermark successfully saved, oldest first
    pub fn history(&self) -> Vec<Watermark> {
        self.history.read().unwrap().clone()
    }
}

#[async_trait]
impl WatermarkStore for InMemoryWatermarkStore {
    async fn load(&self) -> Watermark {
        *self.current.read().unwrap()
    }

    async fn save(&self, watermark: Watermark) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )));
        }

        *self.current.write().unwrap() = watermark;
        self.history.write().unwrap().push(watermark);
        Ok(())
    }
}

// ============================================================================
// Mock Feed Source
// ============================================================================

/// Feed source serving canned entries per URL. Unknown URLs fail.
#[derive(Default)]
pub struct MockFeedSource {
    feeds: Arc<RwLock<HashMap<String, Result<Vec<RawEntry>, String>>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(self, url: &str, entries: Vec<RawEntry>) -> Self {
        self.set_entries(url, entries);
        self
    }

    pub fn with_failure(self, url: &str, message: &str) -> Self {
        self.feeds
            .write()
            .unwrap()
            .insert(url.to_string(), Err(message.to_string()));
        self
    }

    /// Replace what `url` serves, e.g. between two runs
    pub fn set_entries(&self, url: &str, entries: Vec<RawEntry>) {
        self.feeds
            .write()
            .unwrap()
            .insert(url.to_string(), Ok(entries));
    }

    /// URLs fetched so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<RawEntry>, FetchError> {
        self.calls.write().unwrap().push(url.to_string());

        match self.feeds.read().unwrap().get(url) {
            Some(Ok(entries)) => Ok(entries.clone()),
            Some(Err(message)) => Err(FetchError::Parse {
                url: url.to_string(),
                message: message.clone(),
            }),
            None => Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

// ============================================================================
// Fixed Clock
// ============================================================================

pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap()
    }
}
