//! Output writers
//!
//! - json: structured data file (full replace)
//! - html: browsable listing with clickable headlines (full replace)
//! - csv: optional flat export of the same records (full replace)
//! - markdown: terminal rendering used by dry runs and `show latest`

pub mod csv;
pub mod html;
pub mod json;
pub mod markdown;

pub use markdown::Renderer;

use std::fs;
use std::path::Path;

use crate::error::{NewsError, Result};

/// Write `content` to `path`, creating parent directories and replacing any existing file
fn write_replacing(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                NewsError::Writer(format!("Cannot create '{}': {}", parent.display(), e))
            })?;
        }
    }

    fs::write(path, content)
        .map_err(|e| NewsError::Writer(format!("Cannot write '{}': {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a/b/out.txt");

        write_replacing(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_replacing(&blocker.join("out.json"), "{}").unwrap_err();
        assert!(matches!(err, NewsError::Writer(_)));
    }
}
