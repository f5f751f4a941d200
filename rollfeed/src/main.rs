//! rollfeed
//!
//! Aggregates several RSS/Atom feeds into a rolling master feed and, once a
//! day, a digest of the items that arrived since the previous digest.
//! Uses hexagonal (ports & adapters) architecture so the merge and digest
//! logic can be exercised without network or disk.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;

#[cfg(test)]
mod test_utils;


use adapters::{HttpFeedSource, JsonWatermarkStore, RssFileStore, SystemClock};
use app::{DigestOutcome, RunService};
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rollfeed=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Starting rollfeed with {} sources (master {}, digest {})",
        config.sources.len(),
        config.master_file.display(),
        config.daily_file.display()
    );

    let source = Arc::new(HttpFeedSource::new(
        config.fetch_timeout,
        &config.user_agent,
    )?);
    let master_document = Arc::new(RssFileStore::new(&config.master_file));
    let daily_document = Arc::new(RssFileStore::new(&config.daily_file));
    let watermarks = Arc::new(JsonWatermarkStore::new(&config.state_file));

    let service = RunService::new(
        &config,
        master_document,
        daily_document,
        source,
        watermarks,
        Arc::new(SystemClock),
    );

    match service.run().await {
        Ok(report) => {
            match report.digest {
                Some(DigestOutcome::Written { selected, .. }) => {
                    tracing::info!("Run complete, digest delivered {} items", selected)
                }
                Some(DigestOutcome::Skipped) => {
                    tracing::info!("Run complete, digest skipped")
                }
                None => tracing::info!("Run complete"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
