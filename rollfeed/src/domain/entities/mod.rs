//! Domain entities

pub mod channel;
pub mod feed_item;
pub mod watermark;

pub use channel::ChannelInfo;
pub use feed_item::{FeedItem, PLACEHOLDER_TITLE};
pub use watermark::Watermark;
