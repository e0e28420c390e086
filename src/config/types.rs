use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// crypto-news configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source registry: what to poll on each platform
    pub sources: Sources,

    /// Where and how results are written
    pub output: Output,

    /// Collection limits
    pub limits: Limits,

    /// Date filter settings
    pub filter: Filter,

    /// Base URLs of the platform APIs
    pub endpoints: Endpoints,

    /// HTTP client settings
    pub http: Http,
}

/// Static lists of source entries, one per platform.
/// A missing `[sources]` table means the built-in registry; a list left out
/// of a present table is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sources {
    /// Microblog account handles
    #[serde(default)]
    pub microblog_accounts: Vec<String>,

    /// Forum communities (subreddit names without the `r/` prefix)
    #[serde(default)]
    pub forum_communities: Vec<String>,

    /// Repositories as `owner/repo`
    #[serde(default)]
    pub repositories: Vec<String>,

    /// Syndication feeds
    #[serde(default)]
    pub feeds: Vec<FeedSource>,
}

/// A named syndication feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

/// Order in which records are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrder {
    /// Fetcher invocation order: microblog, forum, feed, repository
    #[default]
    Fetch,
    /// Newest publication first, undated records last
    NewestFirst,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    /// Directory receiving the data file and the listing
    pub dir: PathBuf,

    /// File name of the JSON data file
    pub json_file: String,

    /// File name of the HTML listing
    pub listing_file: String,

    /// Optional CSV export next to the JSON data file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_file: Option<String>,

    /// Record ordering
    pub order: RecordOrder,
}

/// Limits for data collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum items requested per source entry
    pub max_items_per_source: usize,

    /// Maximum characters of a post used as its title
    pub max_title_chars: usize,

    /// Maximum characters kept in a summary
    pub max_summary_chars: usize,
}

/// Date filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    /// Keep only records published on the reference day
    pub today_only: bool,

    /// IANA timezone used to decide what "today" means
    pub timezone: String,
}

/// Platform API base URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub microblog_api: String,
    pub forum_auth: String,
    pub forum_api: String,
    /// Gateway in front of the code host; `https://api.github.com/repos` for direct access
    pub repository_api: String,
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Http {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    pub user_agent: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Sources {
    fn default() -> Self {
        let feeds = [
            ("CoinDesk", "https://www.coindesk.com/arc/outboundfeeds/rss/"),
            ("Decrypt", "https://decrypt.co/feed"),
            ("Bankless", "https://www.bankless.com/feed"),
            ("BeInCrypto", "https://beincrypto.com/feed/"),
            ("The Block", "https://www.theblock.co/rss"),
            ("Bitcoin Magazine", "https://bitcoinmagazine.com/.rss/full/"),
            ("Blockworks", "https://blockworks.co/rss"),
            ("The Defiant", "https://thedefiant.io/feed"),
            ("TechNews180", "https://technews180.com/feed"),
            ("Cointelegraph Magazine", "https://cointelegraph.com/magazine/feed"),
            ("ShiftMag", "https://shiftmag.io/feed"),
        ];

        Self {
            microblog_accounts: strings(&[
                "APompliano",
                "VitalikButerin",
                "cz_binance",
                "IvanonTech",
                "pmarca",
                "CryptoWendyO",
                "natbrunell",
                "ErikVoorhees",
                "laurashin",
                "AltcoinDailyio",
            ]),
            forum_communities: strings(&[
                "CryptoCurrency",
                "Bitcoin",
                "Ethereum",
                "CryptoMarkets",
                "dogecoin",
                "Altcoin",
                "DeFi",
                "BitcoinBeginners",
                "NFT",
                "CryptoTechnology",
            ]),
            repositories: strings(&[
                "0xjeffro/CryptoHub",
                "ViktorVL584/Crypto-News-Aggregator",
                "kukapay/crypto-rss-mcp",
            ]),
            feeds: feeds
                .iter()
                .map(|(name, url)| FeedSource {
                    name: name.to_string(),
                    url: url.to_string(),
                })
                .collect(),
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./data"),
            json_file: "latest.json".to_string(),
            listing_file: "latest.html".to_string(),
            csv_file: None,
            order: RecordOrder::Fetch,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_items_per_source: 5,
            max_title_chars: 100,
            max_summary_chars: 200,
        }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            today_only: true,
            timezone: "Asia/Jerusalem".to_string(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            microblog_api: "https://api.twitter.com/2".to_string(),
            forum_auth: "https://www.reddit.com/api/v1/access_token".to_string(),
            forum_api: "https://oauth.reddit.com".to_string(),
            repository_api: "https://gitmcp.io".to_string(),
        }
    }
}

impl Default for Http {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            user_agent: "crypto-news/0.1".to_string(),
        }
    }
}
