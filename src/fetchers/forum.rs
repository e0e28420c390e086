use serde::Deserialize;
use tracing::{debug, warn};

use super::http::{HttpRequest, Transport};
use super::{EntryResult, Fetcher};
use crate::config::{Config, ForumCredentials};
use crate::error::{NewsError, Result};
use crate::models::{Platform, RawItem, Submission};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Submission,
}

/// Forum fetcher: newest submissions per community through an app-only OAuth token
pub struct ForumFetcher<'a> {
    config: &'a Config,
    user_agent: String,
    access_token: String,
    transport: &'a dyn Transport,
}

impl<'a> ForumFetcher<'a> {
    /// Exchange the client credentials for an access token
    pub fn connect(
        config: &'a Config,
        credentials: &ForumCredentials,
        transport: &'a dyn Transport,
    ) -> Result<Self> {
        let request = HttpRequest::post_form(
            config.endpoints.forum_auth.as_str(),
            &[("grant_type", "client_credentials")],
        )
        .basic_auth(&credentials.client_id, &credentials.client_secret)
        .header("User-Agent", credentials.user_agent.as_str());

        let token: TokenResponse = transport.send(&request)?.error_for_status()?.json()?;
        let access_token = match (token.access_token, token.error) {
            (Some(access_token), _) if !access_token.is_empty() => access_token,
            (_, Some(error)) => {
                return Err(NewsError::Fetch(format!(
                    "forum authentication rejected: {}",
                    error
                )))
            }
            _ => {
                return Err(NewsError::Fetch(
                    "forum authentication returned no token".to_string(),
                ))
            }
        };

        Ok(Self {
            config,
            user_agent: credentials.user_agent.clone(),
            access_token,
            transport,
        })
    }

    /// Fetch the newest submissions of one community
    fn fetch_community(&self, community: &str) -> Result<Vec<RawItem>> {
        let api = self.config.endpoints.forum_api.trim_end_matches('/');
        let limit = self.config.limits.max_items_per_source;

        let listing: Listing = self
            .transport
            .send(
                &HttpRequest::get(format!("{}/r/{}/new", api, community))
                    .bearer(&self.access_token)
                    .header("User-Agent", self.user_agent.as_str())
                    .query("limit", limit)
                    .query("raw_json", 1),
            )?
            .error_for_status()?
            .json()?;

        debug!(community, posts = listing.data.children.len(), "forum listing");

        Ok(listing
            .data
            .children
            .into_iter()
            .take(limit)
            .map(|child| RawItem::Submission(child.data))
            .collect())
    }
}

impl Fetcher for ForumFetcher<'_> {
    fn platform(&self) -> Platform {
        Platform::Forum
    }

    fn fetch(&self) -> Vec<EntryResult> {
        self.config
            .sources
            .forum_communities
            .iter()
            .map(|community| {
                let outcome = self.fetch_community(community);
                if let Err(e) = &outcome {
                    warn!(community = %community, error = %e, "skipping forum community");
                }
                EntryResult::new(format!("r/{}", community), outcome)
            })
            .collect()
    }
}
