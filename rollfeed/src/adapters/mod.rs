//! Adapters layer
//!
//! Implementations of port traits for the network, the filesystem and the
//! system clock.

pub mod clock;
pub mod http;
pub mod json_state;
pub mod rss_file;

mod atomic;

pub use clock::SystemClock;
pub use http::HttpFeedSource;
pub use json_state::JsonWatermarkStore;
pub use rss_file::RssFileStore;
