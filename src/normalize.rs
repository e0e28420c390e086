//! Maps raw platform items onto the common [`Record`] shape.
//!
//! Pure field mapping: never fails on missing fields, substitutes empty
//! strings or `None`, and only drops items with neither a title nor a URL.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::config::Limits;
use crate::models::{Article, Commit, Post, RawItem, Record, Release, Submission};

const MICROBLOG_WEB: &str = "https://twitter.com";
const FORUM_WEB: &str = "https://www.reddit.com";

/// Normalizer configured with the title/summary caps
pub struct Normalizer<'a> {
    limits: &'a Limits,
}

impl<'a> Normalizer<'a> {
    pub fn new(limits: &'a Limits) -> Self {
        Self { limits }
    }

    /// Normalize one raw item fetched from `source`. Returns `None` for unidentifiable items.
    pub fn normalize(&self, raw: &RawItem, source: &str) -> Option<Record> {
        let (title, url, summary, published) = match raw {
            RawItem::Post(post) => self.post_fields(post, source),
            RawItem::Submission(submission) => self.submission_fields(submission),
            RawItem::Article(article) => article_fields(article),
            RawItem::Commit(commit) => commit_fields(commit),
            RawItem::Release(release) => self.release_fields(release),
        };

        let title = title.trim().to_string();
        let url = url.trim().to_string();
        if title.is_empty() && url.is_empty() {
            return None;
        }

        Some(Record {
            platform: raw.platform(),
            source: source.to_string(),
            title: if title.is_empty() { url.clone() } else { title },
            url,
            summary: summary.trim().to_string(),
            published,
        })
    }

    /// Normalize a batch, dropping unidentifiable items
    pub fn normalize_all(&self, raws: &[RawItem], source: &str) -> Vec<Record> {
        raws.iter()
            .filter_map(|raw| self.normalize(raw, source))
            .collect()
    }

    fn post_fields(&self, post: &Post, handle: &str) -> Fields {
        let text = post.text.trim();
        let url = post
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("{}/{}/status/{}", MICROBLOG_WEB, handle, id))
            .unwrap_or_default();

        (
            truncate_chars(text, self.limits.max_title_chars),
            url,
            text.to_string(),
            post.created_at.as_deref().and_then(parse_timestamp),
        )
    }

    fn submission_fields(&self, submission: &Submission) -> Fields {
        let url = non_empty(submission.url.as_deref())
            .map(str::to_string)
            .or_else(|| {
                non_empty(submission.permalink.as_deref())
                    .map(|permalink| format!("{}{}", FORUM_WEB, permalink))
            })
            .unwrap_or_default();

        let published = submission
            .created_utc
            .and_then(|secs| Utc.timestamp_opt(secs.trunc() as i64, 0).single());

        (
            submission.title.clone(),
            url,
            truncate_chars(&submission.selftext, self.limits.max_summary_chars),
            published,
        )
    }

    fn release_fields(&self, release: &Release) -> Fields {
        let title = non_empty(release.name.as_deref())
            .or_else(|| non_empty(release.tag_name.as_deref()))
            .unwrap_or_default();
        let url = non_empty(release.html_url.as_deref())
            .or_else(|| non_empty(release.url.as_deref()))
            .unwrap_or_default();

        (
            title.to_string(),
            url.to_string(),
            truncate_chars(
                release.body.as_deref().unwrap_or_default(),
                self.limits.max_summary_chars,
            ),
            release.published_at.as_deref().and_then(parse_timestamp),
        )
    }
}

/// title, url, summary, published
type Fields = (String, String, String, Option<DateTime<Utc>>);

fn article_fields(article: &Article) -> Fields {
    (
        article.title.clone().unwrap_or_default(),
        article.link.clone().unwrap_or_default(),
        article.summary.clone().unwrap_or_default(),
        article.published,
    )
}

fn commit_fields(commit: &Commit) -> Fields {
    let headline = commit
        .commit
        .message
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    let url = non_empty(commit.html_url.as_deref())
        .or_else(|| non_empty(commit.url.as_deref()))
        .unwrap_or_default();
    let published = commit
        .commit
        .author
        .as_ref()
        .and_then(|author| author.date.as_deref())
        .and_then(parse_timestamp);

    (headline.clone(), url.to_string(), headline, published)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Keep at most `max` characters
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Parse a platform timestamp: RFC 3339, RFC 2822, or a naive ISO time taken as UTC
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
