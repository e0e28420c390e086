//! Data models module
//!
//! Defines the normalized record, the raw per-platform items fetched from
//! the network, and the aggregated digest of one run.

pub mod digest;
pub mod raw;
pub mod record;

pub use digest::{Digest, DigestStats};
pub use raw::{Article, Commit, Post, RawItem, Release, Submission};
pub use record::{Platform, Record};
