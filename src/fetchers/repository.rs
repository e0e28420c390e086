use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::http::{HttpRequest, HttpResponse, Transport};
use super::{EntryResult, Fetcher};
use crate::config::Config;
use crate::error::{NewsError, Result};
use crate::models::{Commit, Platform, RawItem, Release};

/// Repository-activity fetcher: recent commits and releases per `owner/repo`
pub struct RepositoryFetcher<'a> {
    config: &'a Config,
    token: Option<&'a str>,
    transport: &'a dyn Transport,
}

impl<'a> RepositoryFetcher<'a> {
    pub fn new(config: &'a Config, token: Option<&'a str>, transport: &'a dyn Transport) -> Self {
        Self {
            config,
            token,
            transport,
        }
    }

    /// Fetch commits and releases of one repository. Each half fails independently.
    fn fetch_repository(&self, identifier: &str) -> Result<Vec<RawItem>> {
        let (owner, repo) = split_identifier(identifier)?;

        let mut items = Vec::new();
        let mut errors = Vec::new();

        match self.list::<Commit>(owner, repo, "commits") {
            Ok(commits) => items.extend(commits.into_iter().map(RawItem::Commit)),
            Err(e) => {
                warn!(repository = identifier, error = %e, "skipping commits");
                errors.push(format!("commits: {}", e));
            }
        }

        match self.list::<Release>(owner, repo, "releases") {
            Ok(releases) => items.extend(releases.into_iter().map(RawItem::Release)),
            Err(e) => {
                warn!(repository = identifier, error = %e, "skipping releases");
                errors.push(format!("releases: {}", e));
            }
        }

        if errors.len() == 2 {
            return Err(NewsError::Fetch(errors.join("; ")));
        }
        Ok(items)
    }

    /// GET one listing (`commits` or `releases`) and keep the first N entries
    fn list<T: DeserializeOwned>(&self, owner: &str, repo: &str, kind: &str) -> Result<Vec<T>> {
        let api = self.config.endpoints.repository_api.trim_end_matches('/');
        let limit = self.config.limits.max_items_per_source;

        let mut request = HttpRequest::get(format!("{}/{}/{}/{}", api, owner, repo, kind))
            .header("Accept", "application/vnd.github+json")
            .query("per_page", limit);
        if let Some(token) = self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = self.transport.send(&request)?.error_for_status()?;
        let mut entries = decode_listing::<T>(&response, owner, repo, kind);
        entries.truncate(limit);
        debug!(owner, repo, kind, entries = entries.len(), "repository listing");
        Ok(entries)
    }
}

/// Decode a JSON array; anything else (a gateway HTML page, an error object) yields nothing
fn decode_listing<T: DeserializeOwned>(
    response: &HttpResponse,
    owner: &str,
    repo: &str,
    kind: &str,
) -> Vec<T> {
    match response.json::<Vec<T>>() {
        Ok(entries) => entries,
        Err(e) => {
            warn!(owner, repo, kind, error = %e, "non-JSON listing, ignoring");
            Vec::new()
        }
    }
}

fn split_identifier(identifier: &str) -> Result<(&str, &str)> {
    match identifier.trim().split_once('/') {
        Some((owner, repo))
            if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
        {
            Ok((owner, repo))
        }
        _ => Err(NewsError::Config(format!(
            "Invalid repository '{}', expected owner/repo",
            identifier
        ))),
    }
}

impl Fetcher for RepositoryFetcher<'_> {
    fn platform(&self) -> Platform {
        Platform::Repository
    }

    fn fetch(&self) -> Vec<EntryResult> {
        self.config
            .sources
            .repositories
            .iter()
            .map(|identifier| {
                let outcome = self.fetch_repository(identifier);
                if let Err(e) = &outcome {
                    warn!(repository = %identifier, error = %e, "skipping repository");
                }
                EntryResult::new(identifier.trim(), outcome)
            })
            .collect()
    }
}
