//! hpot-ops - operational helpers for honeypot deployments
//!
//! This crate collects the small helpers used by honeypot deployment
//! tooling: a backward block-scan tail reader for large event logs, file
//! utilities (existence, modification age, line counts, bulk reads, line
//! writes), a GeoLite2 country lookup, and a Slack webhook file poster.

pub mod access;
pub mod error;
pub mod fileops;
pub mod geo;
pub mod slack;
pub mod tail;

pub use access::{ReadAccess, SystemAccess};
pub use error::FileError;
pub use geo::GeoDb;
pub use slack::{SlackError, SlackWebhook};
pub use tail::{tail, tail_with_block_size, tail_with_gate, DEFAULT_BLOCK_SIZE};
