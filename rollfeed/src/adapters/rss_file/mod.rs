//! RSS document adapter
//!
//! Stores a feed document as an RSS 2.0 file on disk.

mod store;

pub use store::RssFileStore;
