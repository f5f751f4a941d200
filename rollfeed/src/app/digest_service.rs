//! Daily digest service
//!
//! Picks the master items published after the delivery watermark, writes
//! them as the daily digest and moves the watermark forward.

use std::sync::Arc;

use super::master_feed_service::items_from_document;
use crate::domain::entities::feed_item::sort_newest_first;
use crate::domain::entities::{ChannelInfo, FeedItem, Watermark};
use crate::domain::ports::{Clock, FeedDocumentStore, WatermarkStore};
use crate::error::AppError;

/// Result of a digest run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestOutcome {
    /// No master document existed; nothing was written
    Skipped,
    /// The digest document was rewritten
    Written {
        selected: usize,
        watermark: Watermark,
    },
}

/// Service for producing the daily digest
pub struct DigestService<D, W, C>
where
    D: FeedDocumentStore,
    W: WatermarkStore,
    C: Clock,
{
    master: Arc<D>,
    digest: Arc<D>,
    watermarks: Arc<W>,
    clock: Arc<C>,
    channel: ChannelInfo,
}

impl<D, W, C> DigestService<D, W, C>
where
    D: FeedDocumentStore,
    W: WatermarkStore,
    C: Clock,
{
    pub fn new(
        master: Arc<D>,
        digest: Arc<D>,
        watermarks: Arc<W>,
        clock: Arc<C>,
        channel: ChannelInfo,
    ) -> Self {
        Self {
            master,
            digest,
            watermarks,
            clock,
            channel,
        }
    }

    /// Select the items to deliver and write the digest document.
    ///
    /// Without a watermark the `max_first_run` newest items are delivered.
    /// The digest is written even when nothing is selected; the watermark
    /// only moves when something was.
    pub async fn select(&self, max_first_run: usize) -> Result<DigestOutcome, AppError> {
        tracing::info!("Generating daily digest");

        let Some(entries) = self.master.read().await? else {
            tracing::info!("No master feed found, skipping daily digest");
            return Ok(DigestOutcome::Skipped);
        };

        let watermark = self.watermarks.load().await;
        if !watermark.is_set() {
            tracing::info!(
                "No previous digest, delivering up to {} newest items",
                max_first_run
            );
        }
        let mut items = items_from_document(entries, self.clock.now());
        sort_newest_first(&mut items);

        let selected = select_items(items, watermark, max_first_run);

        self.digest.write(&self.channel, &selected).await?;

        let next = match selected.iter().map(|i| i.published_at).max() {
            Some(latest) => {
                let next = watermark.advance(latest);
                self.watermarks
                    .save(next)
                    .await
                    .map_err(AppError::Watermark)?;
                next
            }
            None => watermark,
        };

        tracing::info!(
            "Daily digest generated with {} new items (watermark {:?})",
            selected.len(),
            next.timestamp().map(|t| t.to_rfc3339())
        );

        Ok(DigestOutcome::Written {
            selected: selected.len(),
            watermark: next,
        })
    }
}

/// Items newer than the watermark, or the first `max_first_run` when
/// there is none. `items` must already be sorted newest first.
fn select_items(items: Vec<FeedItem>, watermark: Watermark, max_first_run: usize) -> Vec<FeedItem> {
    match watermark {
        Watermark::Absent => items.into_iter().take(max_first_run).collect(),
        Watermark::Set(_) => items
            .into_iter()
            .filter(|item| watermark.is_before(&item.published_at))
            .collect(),
    }
}
