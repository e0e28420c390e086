use thiserror::Error;

/// crypto-news error types
#[derive(Error, Debug)]
pub enum NewsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Writer error: {0}")]
    Writer(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for crypto-news operations
pub type Result<T> = std::result::Result<T, NewsError>;
