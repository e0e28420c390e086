//! Markdown rendering of a digest for terminal display.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Digest, Platform, Record};

/// Markdown renderer for digests
pub struct Renderer {
    show_summaries: bool,
}

impl Renderer {
    pub fn new(show_summaries: bool) -> Self {
        Self { show_summaries }
    }

    /// Render a complete digest to Markdown
    pub fn render(&self, digest: &Digest) -> String {
        let mut output = String::new();

        output.push_str(&self.render_header(&digest.date, digest.generated_at));
        output.push_str("\n\n");

        output.push_str(&self.render_summary(digest));
        output.push_str("\n\n");

        for platform in Platform::ALL {
            let records: Vec<&Record> = digest
                .records
                .iter()
                .filter(|r| r.platform == platform)
                .collect();
            if !records.is_empty() {
                output.push_str(&self.render_platform(platform, &records));
                output.push_str("\n\n");
            }
        }

        if !digest.has_activity() {
            output.push_str("*No records.*");
        }

        output.trim_end().to_string()
    }

    /// Render header section
    fn render_header(&self, date: &NaiveDate, generated_at: DateTime<Utc>) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Crypto News: {}\n\n", date.format("%Y-%m-%d")));
        output.push_str(&format!(
            "**Generated:** {}",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output
    }

    /// Render per-platform counts
    fn render_summary(&self, digest: &Digest) -> String {
        let stats = digest.stats();
        let mut output = String::new();

        output.push_str("## Summary\n\n");
        output.push_str("| Platform | Records |\n");
        output.push_str("|----------|---------|\n");
        for platform in Platform::ALL {
            output.push_str(&format!(
                "| {} | {} |\n",
                heading(platform),
                stats.count(platform)
            ));
        }
        output.push_str(&format!("| Total | {} |", stats.total()));

        output
    }

    /// Render one platform section
    fn render_platform(&self, platform: Platform, records: &[&Record]) -> String {
        let mut output = String::new();

        output.push_str(&format!("## {}\n\n", heading(platform)));
        for record in records {
            output.push_str(&self.render_record(record));
        }

        output
    }

    /// Render a single record as a linked bullet
    fn render_record(&self, record: &Record) -> String {
        let when = record
            .published
            .map(|p| format!(" · {}", p.format("%Y-%m-%d %H:%M UTC")))
            .unwrap_or_default();

        let mut output = format!(
            "- [{}]({}) — *{}*{}\n",
            escape_brackets(&record.title),
            record.url,
            record.source,
            when
        );

        if self.show_summaries && !record.summary.is_empty() && record.summary != record.title {
            output.push_str(&format!("  > {}\n", single_line(&record.summary)));
        }

        output
    }
}

fn heading(platform: Platform) -> &'static str {
    match platform {
        Platform::Microblog => "Microblog",
        Platform::Forum => "Forum",
        Platform::Feed => "Feeds",
        Platform::Repository => "Repositories",
    }
}

fn escape_brackets(s: &str) -> String {
    s.replace('[', "\\[").replace(']', "\\]")
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
