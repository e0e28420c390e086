use std::path::Path;

use super::write_replacing;
use crate::error::{NewsError, Result};
use crate::models::Record;

const HEADER: [&str; 6] = ["platform", "source", "title", "url", "summary", "published"];

/// Render records as CSV with a header row, one row per record in digest order.
/// `published` is RFC 3339 or empty.
pub fn render(records: &[Record]) -> Result<String> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| NewsError::Writer(format!("Cannot flush CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| NewsError::Writer(format!("Invalid CSV output: {}", e)))
}

/// Write the CSV export, replacing any previous content
pub fn write(records: &[Record], path: &Path) -> Result<()> {
    write_replacing(path, &render(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn records() -> Vec<Record> {
        vec![
            Record {
                platform: Platform::Feed,
                source: "The Block".to_string(),
                title: "ETF inflows, again".to_string(),
                url: "https://www.theblock.co/post/1".to_string(),
                summary: "Line one\n\"quoted\"".to_string(),
                published: Some(Utc.with_ymd_and_hms(2024, 3, 13, 13, 55, 0).unwrap()),
            },
            Record {
                platform: Platform::Repository,
                source: "o/r".to_string(),
                title: "v0.1.0".to_string(),
                url: "https://github.com/o/r/releases/v0.1.0".to_string(),
                summary: String::new(),
                published: None,
            },
        ]
    }

    #[test]
    fn test_render_rows_in_order() {
        let output = render(&records()).unwrap();
        let mut reader = ::csv::Reader::from_reader(output.as_bytes());

        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, HEADER);

        let rows: Vec<::csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "feed");
        assert_eq!(&rows[0][2], "ETF inflows, again");
        assert_eq!(&rows[0][4], "Line one\n\"quoted\"");
        assert_eq!(&rows[0][5], "2024-03-13T13:55:00Z");
        assert_eq!(&rows[1][0], "repository");
        assert_eq!(&rows[1][5], "");
    }

    #[test]
    fn test_empty_has_header_only() {
        assert_eq!(
            render(&[]).unwrap(),
            "platform,source,title,url,summary,published\n"
        );
    }

    #[test]
    fn test_write_replaces_previous_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("latest.csv");

        write(&records(), &path).unwrap();
        write(&[], &path).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "platform,source,title,url,summary,published\n"
        );
    }
}
