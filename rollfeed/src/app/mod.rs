//! Application layer
//!
//! Contains the use cases: updating the master feed, producing the daily
//! digest, and running both in one invocation.

pub mod dates;
pub mod digest_service;
pub mod master_feed_service;
pub mod run_service;

pub use digest_service::DigestOutcome;
pub use run_service::RunService;
