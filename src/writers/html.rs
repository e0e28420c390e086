use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};
use reqwest::Url;
use std::path::Path;

use super::write_replacing;
use crate::error::Result;
use crate::models::Record;

/// Render the browsable listing: one clickable headline per record, in digest order
pub fn render(records: &[Record], date: NaiveDate) -> String {
    let mut output = String::new();

    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html><head><meta charset=\"UTF-8\"><title>Crypto News</title></head><body>\n");
    output.push_str(&format!(
        "<h1>Crypto News for {}</h1>\n",
        date.format("%Y-%m-%d")
    ));
    output.push_str("<ul>\n");

    for record in records {
        output.push_str(&render_item(record));
        output.push('\n');
    }

    output.push_str("</ul>\n");
    output.push_str("</body></html>\n");

    output
}

/// Render a single list entry. Only web URLs become links.
fn render_item(record: &Record) -> String {
    let headline = if is_web_url(&record.url) {
        format!(
            "<a href=\"{}\" target=\"_blank\">{}</a>",
            encode_double_quoted_attribute(&record.url),
            encode_text(&record.title),
        )
    } else {
        encode_text(&record.title).to_string()
    };

    format!(
        "  <li>{} - {} ({})</li>",
        headline,
        record.platform,
        encode_text(&record.source),
    )
}

fn is_web_url(url: &str) -> bool {
    Url::parse(url.trim()).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Write the listing, replacing any previous document
pub fn write(records: &[Record], date: NaiveDate, path: &Path) -> Result<()> {
    write_replacing(path, &render(records, date))
}
