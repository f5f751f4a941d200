//! Run service
//!
//! One invocation: update the master feed, then produce the daily digest
//! if the clock is inside the daily window.

use std::sync::Arc;

use super::digest_service::{DigestOutcome, DigestService};
use super::master_feed_service::{MasterFeedService, UpdateSummary};
use crate::config::{Config, DailyWindow};
use crate::domain::ports::{Clock, FeedDocumentStore, FeedSource, WatermarkStore};
use crate::error::AppError;

/// What a single run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub update: UpdateSummary,
    /// `None` when the digest was not due
    pub digest: Option<DigestOutcome>,
}

pub struct RunService<D, S, W, C>
where
    D: FeedDocumentStore,
    S: FeedSource,
    W: WatermarkStore,
    C: Clock,
{
    master: MasterFeedService<D, S, C>,
    digest: DigestService<D, W, C>,
    clock: Arc<C>,
    sources: Vec<String>,
    window: DailyWindow,
    force_digest: bool,
    first_run_count: usize,
}

impl<D, S, W, C> RunService<D, S, W, C>
where
    D: FeedDocumentStore,
    S: FeedSource,
    W: WatermarkStore,
    C: Clock,
{
    /// Wire both services from their ports and the run configuration
    pub fn new(
        config: &Config,
        master_document: Arc<D>,
        daily_document: Arc<D>,
        source: Arc<S>,
        watermarks: Arc<W>,
        clock: Arc<C>,
    ) -> Self {
        let master = MasterFeedService::new(
            master_document.clone(),
            source,
            clock.clone(),
            config.master_channel(),
            config.max_items,
        );
        let digest = DigestService::new(
            master_document,
            daily_document,
            watermarks,
            clock.clone(),
            config.daily_channel(),
        );

        Self {
            master,
            digest,
            clock,
            sources: config.sources.clone(),
            window: config.daily_window,
            force_digest: config.force_digest,
            first_run_count: config.first_run_count,
        }
    }

    pub async fn run(&self) -> Result<RunReport, AppError> {
        let update = self.master.update(&self.sources).await?;

        let digest = if self.force_digest || self.window.contains(self.clock.now()) {
            Some(self.digest.select(self.first_run_count).await?)
        } else {
            tracing::debug!("Outside the daily window, digest not due");
            None
        };

        Ok(RunReport { update, digest })
    }
}
