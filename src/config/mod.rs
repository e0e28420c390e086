//! Configuration module
//!
//! Handles loading and saving of crypto-news.toml configuration files and
//! reading platform credentials from the environment.

mod credentials;
mod types;

#[allow(unused_imports)]
pub use credentials::{Credentials, ForumCredentials};
#[allow(unused_imports)]
pub use types::{Config, Endpoints, FeedSource, Filter, Http, Limits, Output, RecordOrder, Sources};

use chrono_tz::Tz;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{NewsError, Result};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "crypto-news.toml";

/// Load configuration from a TOML file
pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        NewsError::Config(format!(
            "Cannot read config from '{}': {}. Run 'crypto-news config init' to create one.",
            path.display(),
            e
        ))
    })?;

    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Load an explicitly named config, or the default file if present, or the built-in defaults
pub fn load_or_default(path: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = path {
        return load(&path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return load(default_path);
    }

    info!("no {} found, using built-in source registry", DEFAULT_CONFIG_FILE);
    Ok(Config::default())
}

/// Save configuration to a TOML file
pub fn save(config: &Config, path: &Path) -> Result<()> {
    let toml = toml::to_string_pretty(config)
        .map_err(|e| NewsError::Config(format!("Failed to serialize config: {}", e)))?;

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, toml)?;
    Ok(())
}

impl Filter {
    /// Resolve the configured IANA timezone name
    pub fn tz(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|e| {
            NewsError::Config(format!("Unknown timezone '{}': {}", self.timezone, e))
        })
    }
}
