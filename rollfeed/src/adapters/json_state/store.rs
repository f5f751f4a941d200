//! JSON watermark store

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::adapters::atomic::write_atomic;
use crate::domain::entities::Watermark;
use crate::domain::ports::WatermarkStore;
use crate::error::StoreError;

/// On-disk state record: `{"last_seen": "<RFC 3339>" | null}`
#[derive(Debug, Default, Serialize)]
struct StateRecord {
    last_seen: Option<DateTime<FixedOffset>>,
}

/// Decode a state record. Only a JSON object is accepted; serde would
/// otherwise also read the struct from a sequence.
fn parse_record(bytes: &[u8]) -> Result<StateRecord, serde_json::Error> {
    let mut object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(bytes)?;
    let last_seen = match object.remove("last_seen") {
        Some(value) => serde_json::from_value(value)?,
        None => None,
    };
    Ok(StateRecord { last_seen })
}

/// Watermark store backed by a JSON file
pub struct JsonWatermarkStore {
    path: PathBuf,
}

impl JsonWatermarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WatermarkStore for JsonWatermarkStore {
    async fn load(&self) -> Watermark {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Watermark::Absent,
            Err(e) => {
                tracing::warn!(
                    "Cannot read state {}: {}, treating as first run",
                    self.path.display(),
                    e
                );
                return Watermark::Absent;
            }
        };

        match parse_record(&bytes) {
            Ok(record) => Watermark::from(record.last_seen),
            Err(e) => {
                tracing::warn!(
                    "Malformed state {}: {}, treating as first run",
                    self.path.display(),
                    e
                );
                Watermark::Absent
            }
        }
    }

    async fn save(&self, watermark: Watermark) -> Result<(), StoreError> {
        let record = StateRecord {
            last_seen: watermark.timestamp(),
        };
        let json = serde_json::to_vec_pretty(&record)?;

        write_atomic(self.path.clone(), json).await
    }
}
