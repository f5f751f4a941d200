//! JSON state adapter
//!
//! Persists the delivery watermark in a small JSON record.

mod store;

pub use store::JsonWatermarkStore;
