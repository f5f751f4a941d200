//! Watermark store port trait

use async_trait::async_trait;

use crate::domain::entities::Watermark;
use crate::error::StoreError;

/// Persists the delivery watermark between runs
#[async_trait]
pub trait WatermarkStore: Send + Sync {
    /// Load the persisted watermark. A missing or unreadable record is
    /// reported as `Watermark::Absent`, never as an error.
    async fn load(&self) -> Watermark;

    /// Overwrite the persisted watermark
    async fn save(&self, watermark: Watermark) -> Result<(), StoreError>;
}
