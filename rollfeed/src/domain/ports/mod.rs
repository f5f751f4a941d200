//! Domain ports (traits)
//!
//! Port traits define the interfaces the application services require.
//! Adapters provide concrete implementations of these traits.

pub mod clock;
pub mod documents;
pub mod feed_source;
pub mod state;

pub use clock::Clock;
pub use documents::{FeedDocumentStore, StoredEntry};
pub use feed_source::{FeedSource, RawEntry};
pub use state::WatermarkStore;
