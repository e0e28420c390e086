use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::record::Platform;

// ============================================================================
// Microblog
// ============================================================================

/// A post as returned by the microblog timeline endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Post {
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
    pub created_at: Option<String>,
}

// ============================================================================
// Forum
// ============================================================================

/// A forum submission (the `data` object of a listing child)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    pub url: Option<String>,
    pub permalink: Option<String>,
    /// Seconds since the Unix epoch
    pub created_utc: Option<f64>,
}

// ============================================================================
// Feed
// ============================================================================

/// A syndication feed entry, already decoded from RSS/Atom/JSON Feed
#[derive(Debug, Clone, Default)]
pub struct Article {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

// ============================================================================
// Repository
// ============================================================================

/// A commit from the code host's commit listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Commit {
    pub sha: Option<String>,
    pub html_url: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub message: String,
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitAuthor {
    pub date: Option<String>,
}

/// A release from the code host's release listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Release {
    pub name: Option<String>,
    pub tag_name: Option<String>,
    pub html_url: Option<String>,
    pub url: Option<String>,
    pub body: Option<String>,
    pub published_at: Option<String>,
}

/// Platform-native item handed from a fetcher to the normalizer
#[derive(Debug, Clone)]
pub enum RawItem {
    Post(Post),
    Submission(Submission),
    Article(Article),
    Commit(Commit),
    Release(Release),
}

impl RawItem {
    pub fn platform(&self) -> Platform {
        match self {
            RawItem::Post(_) => Platform::Microblog,
            RawItem::Submission(_) => Platform::Forum,
            RawItem::Article(_) => Platform::Feed,
            RawItem::Commit(_) | RawItem::Release(_) => Platform::Repository,
        }
    }
}
