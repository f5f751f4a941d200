//! Domain layer
//!
//! Contains the feed model and the interfaces the services depend on.
//! - `entities`: feed items, the delivery watermark and channel headers
//! - `ports`: Trait definitions for fetching, persistence and time

pub mod entities;
pub mod ports;
