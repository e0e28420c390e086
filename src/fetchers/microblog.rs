use serde::Deserialize;
use tracing::{debug, warn};

use super::http::{HttpRequest, Transport};
use super::{EntryResult, Fetcher};
use crate::config::Config;
use crate::error::{NewsError, Result};
use crate::models::{Platform, Post, RawItem};

/// The timeline endpoint rejects `max_results` outside this range
const MIN_RESULTS: usize = 5;
const MAX_RESULTS: usize = 100;

#[derive(Debug, Deserialize)]
struct UserLookup {
    data: Option<User>,
}

#[derive(Debug, Deserialize)]
struct User {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Timeline {
    #[serde(default)]
    data: Vec<Post>,
}

/// Microblog fetcher: recent posts per configured account, bearer-token authenticated
pub struct MicroblogFetcher<'a> {
    config: &'a Config,
    bearer: &'a str,
    transport: &'a dyn Transport,
}

impl<'a> MicroblogFetcher<'a> {
    pub fn new(config: &'a Config, bearer: &'a str, transport: &'a dyn Transport) -> Self {
        Self {
            config,
            bearer,
            transport,
        }
    }

    /// Fetch recent posts of one account
    fn fetch_account(&self, handle: &str) -> Result<Vec<RawItem>> {
        let api = self.config.endpoints.microblog_api.trim_end_matches('/');

        let lookup: UserLookup = self
            .transport
            .send(&HttpRequest::get(format!("{}/users/by/username/{}", api, handle)).bearer(self.bearer))?
            .error_for_status()?
            .json()?;
        let user = lookup
            .data
            .ok_or_else(|| NewsError::Fetch(format!("account '{}' not found", handle)))?;

        let max_results = self
            .config
            .limits
            .max_items_per_source
            .clamp(MIN_RESULTS, MAX_RESULTS);
        let timeline: Timeline = self
            .transport
            .send(
                &HttpRequest::get(format!("{}/users/{}/tweets", api, user.id))
                    .bearer(self.bearer)
                    .query("max_results", max_results)
                    .query("tweet.fields", "created_at"),
            )?
            .error_for_status()?
            .json()?;

        debug!(account = handle, posts = timeline.data.len(), "microblog timeline");

        Ok(timeline
            .data
            .into_iter()
            .take(self.config.limits.max_items_per_source)
            .map(RawItem::Post)
            .collect())
    }
}

impl Fetcher for MicroblogFetcher<'_> {
    fn platform(&self) -> Platform {
        Platform::Microblog
    }

    fn fetch(&self) -> Vec<EntryResult> {
        self.config
            .sources
            .microblog_accounts
            .iter()
            .map(|handle| {
                let outcome = self.fetch_account(handle);
                if let Err(e) = &outcome {
                    warn!(account = %handle, error = %e, "skipping microblog account");
                }
                EntryResult::new(handle.as_str(), outcome)
            })
            .collect()
    }
}
