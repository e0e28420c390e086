//! Platform fetchers
//!
//! One fetcher per platform, each walking its slice of the source registry:
//! - MicroblogFetcher: recent posts per account
//! - ForumFetcher: newest submissions per community
//! - FeedFetcher: RSS/Atom/JSON Feed entries per feed
//! - RepositoryFetcher: recent commits and releases per repository
//!
//! A failing source entry never aborts the fetcher; it is reported as an
//! `Err` in its [`EntryResult`] and contributes zero items.

mod feed;
#[cfg(test)]
pub(crate) mod fixture;
mod forum;
pub mod http;
mod microblog;
mod repository;

pub use feed::FeedFetcher;
pub use forum::ForumFetcher;
pub use http::{HttpTransport, Transport};
pub use microblog::MicroblogFetcher;
pub use repository::RepositoryFetcher;

use crate::error::Result;
use crate::models::{Platform, RawItem};

/// Outcome of fetching one source entry
#[derive(Debug)]
pub struct EntryResult {
    /// Source identifier as it appears on normalized records
    pub source: String,
    pub outcome: Result<Vec<RawItem>>,
}

impl EntryResult {
    pub fn new(source: impl Into<String>, outcome: Result<Vec<RawItem>>) -> Self {
        Self {
            source: source.into(),
            outcome,
        }
    }
}

/// A collector for one platform
pub trait Fetcher {
    fn platform(&self) -> Platform;

    /// Fetch every configured source entry, one attempt each
    fn fetch(&self) -> Vec<EntryResult>;
}
