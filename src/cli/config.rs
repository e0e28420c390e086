use std::path::PathBuf;

use crate::config::{self, Config, DEFAULT_CONFIG_FILE};
use crate::error::Result;

/// Write a configuration file holding the built-in defaults
pub fn init(path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    if config_path.exists() {
        eprintln!(
            "Configuration file already exists at: {}",
            config_path.display()
        );
        eprintln!("Remove it first if you want to reinitialize.");
        return Ok(());
    }

    let config = Config::default();
    config::save(&config, &config_path)?;

    println!("Configuration file created: {}", config_path.display());
    println!("\nNext steps:");
    println!(
        "1. Edit {} to adjust sources, limits and the date filter",
        config_path.display()
    );
    println!("2. Export TWITTER_BEARER_TOKEN, REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET (optional)");
    println!("3. Run 'crypto-news run' to build today's feed");

    Ok(())
}
