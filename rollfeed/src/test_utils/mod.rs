//! Test utilities
//!
//! Manual mock implementations of the port traits and fixture builders.
//! The mocks keep everything in memory and record how they were used so
//! tests can assert on writes and fetch order.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
