//! HTTP feed source adapter

mod client;
mod parse;

pub use client::HttpFeedSource;
