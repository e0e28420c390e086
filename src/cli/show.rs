use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;

use crate::config;
use crate::error::{NewsError, Result};
use crate::models::Digest;
use crate::writers::{json, Renderer};

/// Display the data file written by the most recent run
pub fn latest(config_path: Option<PathBuf>) -> Result<()> {
    let config = config::load_or_default(config_path)?;
    let tz = config.filter.tz()?;

    let path = config.output.dir.join(&config.output.json_file);
    if !path.is_file() {
        return Err(NewsError::Config(format!(
            "No output found at '{}'. Run 'crypto-news run' first.",
            path.display()
        )));
    }

    let records = json::read(&path)?;
    let generated_at: DateTime<Utc> = fs::metadata(&path)?.modified()?.into();

    let digest = Digest {
        date: generated_at.with_timezone(&tz).date_naive(),
        generated_at,
        records,
    };

    let markdown = Renderer::new(true).render(&digest);
    crate::display::print_markdown(&markdown);

    Ok(())
}
