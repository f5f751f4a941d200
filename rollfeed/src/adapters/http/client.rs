//! HTTP feed source implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::parse::parse_feed;
use crate::domain::ports::{FeedSource, RawEntry};
use crate::error::FetchError;

/// Fetches feeds over HTTP(S), one request per call
pub struct HttpFeedSource {
    http: Client,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<RawEntry>, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let entries = parse_feed(url, &body)?;
        tracing::debug!("Fetched {} entries from {}", entries.len(), url);

        Ok(entries)
    }
}
