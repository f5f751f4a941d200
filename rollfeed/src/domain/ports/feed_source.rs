//! Feed source port trait
//!
//! Abstracts fetching one remote feed. Implementations report entries with
//! their date fields as raw strings; resolving them into a timestamp is the
//! master feed's job.

use async_trait::async_trait;

use crate::error::FetchError;

/// One entry as reported by a feed source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub published: Option<String>,
    pub pub_date: Option<String>,
    pub updated: Option<String>,
}

/// Port trait for fetching feeds
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and parse the feed at `url`
    async fn fetch(&self, url: &str) -> Result<Vec<RawEntry>, FetchError>;
}
