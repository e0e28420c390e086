//! One full run: fetch every platform, normalize, filter, aggregate.

use chrono::{NaiveDate, Utc};
use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::config::{Config, Credentials, RecordOrder};
use crate::error::{NewsError, Result};
use crate::fetchers::{
    EntryResult, FeedFetcher, Fetcher, ForumFetcher, MicroblogFetcher, RepositoryFetcher,
    Transport,
};
use crate::filter::DateFilter;
use crate::models::{Digest, Platform, Record};
use crate::normalize::Normalizer;

/// What happened to one source entry or platform during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    /// Fetched successfully; number of records after normalization
    Fetched(usize),
    /// The entry failed and contributed nothing
    Failed(String),
    /// The whole platform was not run
    PlatformSkipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub platform: Platform,
    /// Source identifier, or `*` for a skipped platform
    pub source: String,
    pub status: SourceStatus,
}

/// Per-run options coming from the command line
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Calendar day used by the date filter
    pub reference_date: NaiveDate,
    /// Apply the same-day filter
    pub today_only: bool,
    /// Platforms to run; empty means all
    pub only: BTreeSet<Platform>,
}

/// Result of a run: the aggregated digest plus the per-source report
#[derive(Debug)]
pub struct RunOutcome {
    pub digest: Digest,
    pub reports: Vec<SourceReport>,
}

impl RunOutcome {
    pub fn fetched_sources(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, SourceStatus::Fetched(_)))
            .count()
    }

    pub fn failed_sources(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, SourceStatus::Failed(_)))
            .count()
    }

    pub fn skipped_platforms(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, SourceStatus::PlatformSkipped(_)))
            .count()
    }
}

/// Concatenate per-platform batches in the given order
pub fn aggregate(batches: Vec<Vec<Record>>) -> Vec<Record> {
    batches.into_iter().flatten().collect()
}

/// Stable sort, newest publication first, undated records last
pub fn sort_newest_first(records: &mut [Record]) {
    records.sort_by(|a, b| b.published.cmp(&a.published));
}

pub struct Pipeline<'a> {
    config: &'a Config,
    credentials: &'a Credentials,
    transport: &'a dyn Transport,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        credentials: &'a Credentials,
        transport: &'a dyn Transport,
    ) -> Self {
        Self {
            config,
            credentials,
            transport,
        }
    }

    /// Run every selected platform once and build the digest
    pub fn run(&self, options: &RunOptions) -> Result<RunOutcome> {
        let tz = self.config.filter.tz()?;
        let normalizer = Normalizer::new(&self.config.limits);

        let mut reports = Vec::new();
        let mut batches = Vec::new();
        let mut attempted = 0usize;
        let mut usable = 0usize;

        for platform in Platform::ALL {
            if !options.only.is_empty() && !options.only.contains(&platform) {
                continue;
            }
            if self.source_count(platform) == 0 {
                continue;
            }
            attempted += 1;

            let fetcher = match self.fetcher(platform) {
                Ok(fetcher) => fetcher,
                Err(reason) => {
                    warn!(%platform, %reason, "skipping platform");
                    reports.push(SourceReport {
                        platform,
                        source: "*".to_string(),
                        status: SourceStatus::PlatformSkipped(reason),
                    });
                    continue;
                }
            };
            usable += 1;

            let mut batch = Vec::new();
            for EntryResult { source, outcome } in fetcher.fetch() {
                let status = match outcome {
                    Ok(raws) => {
                        let records = normalizer.normalize_all(&raws, &source);
                        let count = records.len();
                        batch.extend(records);
                        SourceStatus::Fetched(count)
                    }
                    Err(e) => SourceStatus::Failed(e.to_string()),
                };
                reports.push(SourceReport {
                    platform,
                    source,
                    status,
                });
            }
            info!(platform = %fetcher.platform(), records = batch.len(), "platform fetched");
            batches.push(batch);
        }

        if attempted > 0 && usable == 0 {
            return Err(NewsError::Config(
                "No platform could run; check credentials".to_string(),
            ));
        }

        let mut records = aggregate(batches);
        let fetched = records.len();

        if options.today_only {
            records = DateFilter::new(options.reference_date, tz).apply(records);
            info!(
                date = %options.reference_date,
                kept = records.len(),
                dropped = fetched - records.len(),
                "date filter applied"
            );
        }

        if self.config.output.order == RecordOrder::NewestFirst {
            sort_newest_first(&mut records);
        }

        Ok(RunOutcome {
            digest: Digest {
                date: options.reference_date,
                generated_at: Utc::now(),
                records,
            },
            reports,
        })
    }

    fn source_count(&self, platform: Platform) -> usize {
        let sources = &self.config.sources;
        match platform {
            Platform::Microblog => sources.microblog_accounts.len(),
            Platform::Forum => sources.forum_communities.len(),
            Platform::Feed => sources.feeds.len(),
            Platform::Repository => sources.repositories.len(),
        }
    }

    /// Build the fetcher for `platform`, or the reason it cannot run
    fn fetcher(&self, platform: Platform) -> std::result::Result<Box<dyn Fetcher + 'a>, String> {
        let config = self.config;
        let credentials: &'a Credentials = self.credentials;
        let transport = self.transport;

        match platform {
            Platform::Microblog => match credentials.microblog_bearer.as_deref() {
                Some(bearer) => Ok(Box::new(MicroblogFetcher::new(config, bearer, transport))),
                None => Err("TWITTER_BEARER_TOKEN not set".to_string()),
            },
            Platform::Forum => match &credentials.forum {
                Some(forum) => ForumFetcher::connect(config, forum, transport)
                    .map(|fetcher| Box::new(fetcher) as Box<dyn Fetcher + 'a>)
                    .map_err(|e| e.to_string()),
                None => Err("REDDIT_CLIENT_ID / REDDIT_CLIENT_SECRET not set".to_string()),
            },
            Platform::Feed => Ok(Box::new(FeedFetcher::new(config, transport))),
            Platform::Repository => Ok(Box::new(RepositoryFetcher::new(
                config,
                credentials.repository_token.as_deref(),
                transport,
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FeedSource, ForumCredentials};
    use crate::fetchers::fixture::FixtureTransport;
    use crate::writers::{html, json};
    use chrono::TimeZone;

    const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>Decrypt</title><link>https://decrypt.co</link><description>d</description>
<item><title>Solana outage</title><link>https://decrypt.co/1</link><description>Down again</description>
<pubDate>Fri, 15 Mar 2024 06:00:00 +0000</pubDate></item>
</channel></rss>"#;

    fn config() -> Config {
        let mut config = Config::default();
        config.sources.microblog_accounts = vec!["laurashin".to_string()];
        config.sources.forum_communities = vec!["Bitcoin".to_string()];
        config.sources.feeds = vec![FeedSource {
            name: "Decrypt".to_string(),
            url: "https://decrypt.co/feed".to_string(),
        }];
        config.sources.repositories = vec!["o/r".to_string()];
        config
    }

    fn credentials() -> Credentials {
        Credentials {
            microblog_bearer: Some("bearer".to_string()),
            forum: Some(ForumCredentials {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
                user_agent: "test".to_string(),
            }),
            repository_token: None,
        }
    }

    fn transport() -> FixtureTransport {
        FixtureTransport::new()
            .ok(
                "https://api.twitter.com/2/users/by/username/laurashin",
                r#"{"data": {"id": "1"}}"#,
            )
            .ok(
                "https://api.twitter.com/2/users/1/tweets",
                r#"{"data": [
                    {"id": "11", "text": "Post one", "created_at": "2024-03-15T09:00:00.000Z"},
                    {"id": "12", "text": "Post two", "created_at": "2024-03-14T09:00:00.000Z"}
                ]}"#,
            )
            .ok(
                "https://www.reddit.com/api/v1/access_token",
                r#"{"access_token": "t"}"#,
            )
            .ok(
                "https://oauth.reddit.com/r/Bitcoin/new",
                r#"{"data": {"children": [
                    {"data": {"title": "F1", "url": "https://r.example.com/1", "created_utc": 1710496800.0}},
                    {"data": {"title": "F2", "url": "https://r.example.com/2", "created_utc": 1710496801.0}},
                    {"data": {"title": "F3", "url": "https://r.example.com/3"}}
                ]}}"#,
            )
            .ok("https://decrypt.co/feed", RSS)
            .ok(
                "https://gitmcp.io/o/r/commits",
                r#"[
                    {"html_url": "https://github.com/o/r/commit/1", "commit": {"message": "C1", "author": {"date": "2024-03-15T11:00:00Z"}}},
                    {"html_url": "https://github.com/o/r/commit/2", "commit": {"message": "C2", "author": {"date": "2024-03-15T12:00:00Z"}}}
                ]"#,
            )
            .ok("https://gitmcp.io/o/r/releases", "[]")
    }

    fn options(today_only: bool) -> RunOptions {
        RunOptions {
            reference_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            today_only,
            only: BTreeSet::new(),
        }
    }

    #[test]
    fn test_end_to_end_order_and_count() {
        let config = config();
        let credentials = credentials();
        let transport = transport();

        let outcome = Pipeline::new(&config, &credentials, &transport)
            .run(&options(false))
            .unwrap();

        let platforms: Vec<Platform> = outcome.digest.records.iter().map(|r| r.platform).collect();
        assert_eq!(
            platforms,
            vec![
                Platform::Microblog,
                Platform::Microblog,
                Platform::Forum,
                Platform::Forum,
                Platform::Forum,
                Platform::Feed,
                Platform::Repository,
                Platform::Repository,
            ]
        );
        assert_eq!(outcome.fetched_sources(), 4);
        assert_eq!(outcome.failed_sources(), 0);
        assert_eq!(outcome.skipped_platforms(), 0);
        assert_eq!(outcome.digest.records[5].source, "Decrypt");
        assert_eq!(outcome.digest.records[2].source, "r/Bitcoin");
    }

    #[test]
    fn test_output_is_reproducible() {
        let config = config();
        let credentials = credentials();

        let first = Pipeline::new(&config, &credentials, &transport())
            .run(&options(false))
            .unwrap();
        let second = Pipeline::new(&config, &credentials, &transport())
            .run(&options(false))
            .unwrap();

        assert_eq!(
            json::render(&first.digest.records).unwrap(),
            json::render(&second.digest.records).unwrap()
        );
        assert_eq!(
            html::render(&first.digest.records, first.digest.date),
            html::render(&second.digest.records, second.digest.date)
        );
    }

    #[test]
    fn test_today_filter_applies_to_every_platform() {
        let config = config();
        let credentials = credentials();
        let transport = transport();

        let outcome = Pipeline::new(&config, &credentials, &transport)
            .run(&options(true))
            .unwrap();

        // drops the post from the 14th and the undated forum submission
        let titles: Vec<&str> = outcome
            .digest
            .records
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Post one", "F1", "F2", "Solana outage", "C1", "C2"]);
    }

    #[test]
    fn test_missing_credentials_skip_platform() {
        let config = config();
        let credentials = Credentials::default();
        let transport = transport();

        let outcome = Pipeline::new(&config, &credentials, &transport)
            .run(&options(false))
            .unwrap();

        assert_eq!(outcome.skipped_platforms(), 2);
        assert!(outcome
            .digest
            .records
            .iter()
            .all(|r| matches!(r.platform, Platform::Feed | Platform::Repository)));
        assert_eq!(outcome.digest.records.len(), 3);
    }

    #[test]
    fn test_failures_are_isolated() {
        let config = config();
        let credentials = credentials();
        let transport = transport().fail("https://decrypt.co/feed", "timed out");

        let outcome = Pipeline::new(&config, &credentials, &transport)
            .run(&options(false))
            .unwrap();

        assert_eq!(outcome.digest.records.len(), 7);
        assert_eq!(outcome.failed_sources(), 1);
        let failed = outcome
            .reports
            .iter()
            .find(|r| matches!(r.status, SourceStatus::Failed(_)))
            .unwrap();
        assert_eq!(failed.platform, Platform::Feed);
        assert_eq!(failed.source, "Decrypt");
    }

    #[test]
    fn test_all_platforms_unusable_is_fatal() {
        let mut config = config();
        config.sources.feeds.clear();
        config.sources.repositories.clear();
        let credentials = Credentials::default();
        let transport = transport();

        let err = Pipeline::new(&config, &credentials, &transport)
            .run(&options(false))
            .unwrap_err();
        assert!(matches!(err, NewsError::Config(_)));
    }

    #[test]
    fn test_only_selected_platforms() {
        let config = config();
        let credentials = credentials();
        let transport = transport();
        let mut options = options(false);
        options.only = [Platform::Repository].into_iter().collect();

        let outcome = Pipeline::new(&config, &credentials, &transport)
            .run(&options)
            .unwrap();

        assert_eq!(outcome.digest.records.len(), 2);
        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn test_newest_first_order() {
        let mut config = config();
        config.output.order = RecordOrder::NewestFirst;
        let credentials = credentials();
        let transport = transport();

        let outcome = Pipeline::new(&config, &credentials, &transport)
            .run(&options(false))
            .unwrap();

        let records = &outcome.digest.records;
        assert_eq!(records[0].title, "C2");
        assert_eq!(records.last().unwrap().title, "F3");
        assert!(records
            .windows(2)
            .all(|w| w[0].published >= w[1].published || w[1].published.is_none()));
    }

    #[test]
    fn test_aggregate_concatenates_in_order() {
        let record = |title: &str| Record {
            platform: Platform::Feed,
            source: "s".to_string(),
            title: title.to_string(),
            url: String::new(),
            summary: String::new(),
            published: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        };

        let merged = aggregate(vec![
            vec![record("a"), record("b")],
            vec![],
            vec![record("c")],
        ]);
        let titles: Vec<_> = merged.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }
}
