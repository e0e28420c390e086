use feed_rs::parser::Builder;
use reqwest::Url;
use tracing::{debug, warn};

use super::http::{HttpRequest, Transport};
use super::{EntryResult, Fetcher};
use crate::config::{Config, FeedSource};
use crate::error::{NewsError, Result};
use crate::models::{Article, Platform, RawItem};

/// Feed fetcher: RSS, Atom and JSON Feed entries per configured feed
pub struct FeedFetcher<'a> {
    config: &'a Config,
    transport: &'a dyn Transport,
}

impl<'a> FeedFetcher<'a> {
    pub fn new(config: &'a Config, transport: &'a dyn Transport) -> Self {
        Self { config, transport }
    }

    fn fetch_feed(&self, feed: &FeedSource) -> Result<Vec<RawItem>> {
        let response = self
            .transport
            .send(&HttpRequest::get(feed.url.as_str()))?
            .error_for_status()?;

        let articles = parse_feed(
            &response.body,
            &feed.url,
            self.config.limits.max_items_per_source,
        )?;
        debug!(feed = %feed.name, entries = articles.len(), "feed parsed");

        Ok(articles.into_iter().map(RawItem::Article).collect())
    }
}

/// Decode a feed document fetched from `feed_url` and keep its first `max_items` entries.
/// Entry links are resolved against `feed_url`.
pub fn parse_feed(body: &[u8], feed_url: &str, max_items: usize) -> Result<Vec<Article>> {
    let feed = Builder::new()
        .base_uri(Some(feed_url))
        .build()
        .parse(body)
        .map_err(|e| NewsError::Feed(format!("Failed to parse feed: {}", e)))?;

    Ok(feed
        .entries
        .into_iter()
        .take(max_items)
        .map(|entry| {
            let summary = entry
                .summary
                .map(|text| text.content)
                .filter(|s| !s.trim().is_empty())
                .or_else(|| entry.content.and_then(|content| content.body));

            Article {
                title: entry.title.map(|text| text.content),
                link: entry
                    .links
                    .first()
                    .and_then(|link| absolute_link(feed_url, &link.href)),
                summary,
                published: entry.published.or(entry.updated),
            }
        })
        .collect())
}

/// `href` as an absolute URL, joined onto `feed_url` when relative
fn absolute_link(feed_url: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if let Ok(url) = Url::parse(href) {
        return Some(url.to_string());
    }
    match Url::parse(feed_url).and_then(|base| base.join(href)) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            warn!(feed = feed_url, link = href, error = %e, "dropping unresolvable link");
            None
        }
    }
}

impl Fetcher for FeedFetcher<'_> {
    fn platform(&self) -> Platform {
        Platform::Feed
    }

    fn fetch(&self) -> Vec<EntryResult> {
        self.config
            .sources
            .feeds
            .iter()
            .map(|feed| {
                let outcome = self.fetch_feed(feed);
                if let Err(e) = &outcome {
                    warn!(feed = %feed.name, url = %feed.url, error = %e, "skipping feed");
                }
                EntryResult::new(feed.name.as_str(), outcome)
            })
            .collect()
    }
}
