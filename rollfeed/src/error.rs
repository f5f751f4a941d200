//! Error types for rollfeed
//!
//! Errors are split by layer:
//! - `FetchError`: a single feed source could not be fetched or parsed
//! - `StoreError`: a document or state record could not be read or written
//! - `ConfigError`: an environment variable holds an unusable value
//! - `AppError`: errors surfaced by the application services

use thiserror::Error;

/// Feed source errors - always recoverable, the source is skipped
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Unrecognized feed body from {url}: {message}")]
    Parse { url: String, message: String },
}

/// Persistence errors for feed documents and the state record
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed feed document {path}: {message}")]
    Xml { path: String, message: String },

    #[error("State record encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not replace {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors - reported once at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Application layer errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Store(#[from] StoreError),

    /// The digest was written but the watermark could not be advanced.
    #[error("Watermark not persisted: {0}")]
    Watermark(#[source] StoreError),
}
