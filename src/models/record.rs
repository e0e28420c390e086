use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NewsError;

/// The external system a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Microblog,
    Forum,
    Feed,
    Repository,
}

impl Platform {
    /// All platforms in fetcher invocation order
    pub const ALL: [Platform; 4] = [
        Platform::Microblog,
        Platform::Forum,
        Platform::Feed,
        Platform::Repository,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Microblog => "microblog",
            Platform::Forum => "forum",
            Platform::Feed => "feed",
            Platform::Repository => "repository",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = NewsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "microblog" | "twitter" => Ok(Platform::Microblog),
            "forum" | "reddit" => Ok(Platform::Forum),
            "feed" | "rss" => Ok(Platform::Feed),
            "repository" | "github" => Ok(Platform::Repository),
            other => Err(NewsError::Config(format!("Unknown platform '{}'", other))),
        }
    }
}

/// A normalized news item. Field order is the serialized field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub platform: Platform,
    /// Account handle, `r/<community>`, feed name or `owner/repo`
    pub source: String,
    pub title: String,
    pub url: String,
    pub summary: String,
    /// Publication time, `null` when the platform did not provide a usable one
    pub published: Option<DateTime<Utc>>,
}
