use std::fmt;

const DEFAULT_FORUM_USER_AGENT: &str = "crypto-news/0.1";

/// Platform credentials, read from the environment at startup
#[derive(Clone, Default)]
pub struct Credentials {
    pub microblog_bearer: Option<String>,
    pub forum: Option<ForumCredentials>,
    pub repository_token: Option<String>,
}

#[derive(Clone)]
pub struct ForumCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from an arbitrary key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let forum = match (get("REDDIT_CLIENT_ID"), get("REDDIT_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(ForumCredentials {
                client_id,
                client_secret,
                user_agent: get("REDDIT_USER_AGENT")
                    .unwrap_or_else(|| DEFAULT_FORUM_USER_AGENT.to_string()),
            }),
            _ => None,
        };

        Self {
            microblog_bearer: get("TWITTER_BEARER_TOKEN"),
            forum,
            repository_token: get("GITHUB_TOKEN"),
        }
    }
}

fn presence<T>(value: &Option<T>) -> &'static str {
    if value.is_some() {
        "set"
    } else {
        "missing"
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("microblog_bearer", &presence(&self.microblog_bearer))
            .field("forum", &presence(&self.forum))
            .field("repository_token", &presence(&self.repository_token))
            .finish()
    }
}

impl fmt::Debug for ForumCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForumCredentials")
            .field("client_id", &"***")
            .field("client_secret", &"***")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
