//! Feed document port trait
//!
//! A feed document is an RSS file that is always rewritten in full.

use async_trait::async_trait;

use crate::domain::entities::{ChannelInfo, FeedItem};
use crate::error::StoreError;

/// An item as read back from a stored document, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub pub_date: Option<String>,
}

/// Port trait for one persisted feed document
#[async_trait]
pub trait FeedDocumentStore: Send + Sync {
    /// Read every stored item in document order.
    /// Returns `None` when the document does not exist.
    async fn read(&self) -> Result<Option<Vec<StoredEntry>>, StoreError>;

    /// Replace the document with `items` under `channel`
    async fn write(&self, channel: &ChannelInfo, items: &[FeedItem]) -> Result<(), StoreError>;
}
