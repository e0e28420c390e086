use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{self, Credentials};
use crate::error::{NewsError, Result};
use crate::fetchers::HttpTransport;
use crate::filter::today_in;
use crate::models::Platform;
use crate::pipeline::{Pipeline, RunOptions, RunOutcome, SourceStatus};
use crate::writers::{csv, html, json, Renderer};

/// Build the aggregated feed and write it out
pub fn run(
    config_path: Option<PathBuf>,
    date: Option<String>,
    all: bool,
    only: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let config = config::load_or_default(config_path)?;
    let tz = config.filter.tz()?;

    let reference_date = match date {
        Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|e| NewsError::Config(format!("Invalid date format: {}", e)))?,
        None => today_in(tz),
    };

    let options = RunOptions {
        reference_date,
        today_only: config.filter.today_only && !all,
        only: parse_only(only.as_deref())?,
    };

    let credentials = Credentials::from_env();
    let transport = HttpTransport::new(&config.http)?;

    let outcome = Pipeline::new(&config, &credentials, &transport).run(&options)?;
    log_reports(&outcome);

    let digest = &outcome.digest;
    if dry_run {
        let markdown = Renderer::new(true).render(digest);
        crate::display::print_markdown(&markdown);
    } else {
        let json_path = config.output.dir.join(&config.output.json_file);
        let listing_path = config.output.dir.join(&config.output.listing_file);

        json::write(&digest.records, &json_path)?;
        html::write(&digest.records, digest.date, &listing_path)?;

        println!(
            "Wrote {} records to {}",
            digest.records.len(),
            json_path.display()
        );
        println!("Listing written to: {}", listing_path.display());

        if let Some(csv_file) = &config.output.csv_file {
            let csv_path = config.output.dir.join(csv_file);
            csv::write(&digest.records, &csv_path)?;
            println!("CSV written to: {}", csv_path.display());
        }
    }

    println!(
        "{} source(s) fetched, {} source(s) failed, {} platform(s) skipped",
        outcome.fetched_sources(),
        outcome.failed_sources(),
        outcome.skipped_platforms()
    );

    Ok(())
}

/// Parse a comma-separated platform list; `None` selects every platform
fn parse_only(only: Option<&str>) -> Result<BTreeSet<Platform>> {
    let Some(only) = only else {
        return Ok(BTreeSet::new());
    };

    only.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<Platform>)
        .collect()
}

fn log_reports(outcome: &RunOutcome) {
    for report in &outcome.reports {
        match &report.status {
            SourceStatus::Fetched(count) => {
                info!(platform = %report.platform, source = %report.source, records = count, "fetched")
            }
            SourceStatus::Failed(reason) => {
                warn!(platform = %report.platform, source = %report.source, %reason, "source failed")
            }
            SourceStatus::PlatformSkipped(reason) => {
                warn!(platform = %report.platform, %reason, "platform skipped")
            }
        }
    }
}
