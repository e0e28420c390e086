use std::path::Path;

use super::write_replacing;
use crate::error::Result;
use crate::models::Record;

/// Serialize records as a pretty-printed JSON array. Deterministic for a given input.
pub fn render(records: &[Record]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    Ok(json)
}

/// Write the data file, replacing any previous content
pub fn write(records: &[Record], path: &Path) -> Result<()> {
    write_replacing(path, &render(records)?)
}

/// Read a data file written by [`write`]
pub fn read(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
