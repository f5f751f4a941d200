//! RSS 2.0 file store

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use rss::{Channel, ChannelBuilder, ItemBuilder};

use crate::adapters::atomic::write_atomic;
use crate::app::dates::format_rfc2822;
use crate::domain::entities::{ChannelInfo, FeedItem};
use crate::domain::ports::{FeedDocumentStore, StoredEntry};
use crate::error::StoreError;

/// Feed document backed by an RSS 2.0 file
pub struct RssFileStore {
    path: PathBuf,
}

impl RssFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// Render `items` under `channel` as an RSS 2.0 document
pub fn render_document(channel: &ChannelInfo, items: &[FeedItem]) -> Result<Vec<u8>, rss::Error> {
    let items: Vec<rss::Item> = items
        .iter()
        .map(|item| {
            ItemBuilder::default()
                .title(item.title.clone())
                .link(item.link.clone())
                .description(item.description.clone())
                .pub_date(format_rfc2822(&item.published_at))
                .build()
        })
        .collect();

    let channel = ChannelBuilder::default()
        .title(&channel.title)
        .link(&channel.link)
        .description(&channel.description)
        .items(items)
        .build();

    channel.write_to(Vec::new())
}

#[async_trait]
impl FeedDocumentStore for RssFileStore {
    async fn read(&self) -> Result<Option<Vec<StoredEntry>>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let channel = Channel::read_from(&bytes[..]).map_err(|e| StoreError::Xml {
            path: self.display_path(),
            message: e.to_string(),
        })?;

        let entries = channel
            .items()
            .iter()
            .map(|item| StoredEntry {
                title: item.title().map(str::to_string),
                link: item.link().map(str::to_string),
                description: item.description().map(str::to_string),
                pub_date: item.pub_date().map(str::to_string),
            })
            .collect();

        Ok(Some(entries))
    }

    async fn write(&self, channel: &ChannelInfo, items: &[FeedItem]) -> Result<(), StoreError> {
        let document = render_document(channel, items).map_err(|e| StoreError::Xml {
            path: self.display_path(),
            message: e.to_string(),
        })?;

        write_atomic(self.path.clone(), document).await?;
        tracing::debug!("Wrote {} items to {}", items.len(), self.display_path());
        Ok(())
    }
}
