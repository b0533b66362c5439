//! Output module for writing search results
//!
//! Results are written as indented JSON, either to a file or to stdout.

mod json;

pub use json::{render_json, write_json};

use crate::model::ResultRecord;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing results
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Failed to write output to {path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes results to `path`, or to stdout when no path is given
pub fn write_output(records: &[ResultRecord], path: Option<&Path>) -> OutputResult<()> {
    match path {
        Some(path) => {
            tracing::info!("Writing to file: `{}`", path.display());
            let file = std::fs::File::create(path).map_err(|source| OutputError::File {
                path: path.display().to_string(),
                source,
            })?;
            let mut writer = std::io::BufWriter::new(file);
            write_json(records, &mut writer)?;
            writer.flush().map_err(|source| OutputError::File {
                path: path.display().to_string(),
                source,
            })?;
        }
        None => {
            tracing::info!("Writing to standard output");
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_json(records, &mut handle)?;
            handle.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_output_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("result.json");
        let records = vec![ResultRecord::link_only("https://github.com/foo/bar/wiki".to_string())];

        write_output(&records, Some(&path)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([{"url": "https://github.com/foo/bar/wiki"}])
        );
    }

    #[test]
    fn test_write_output_to_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("result.json");
        let result = write_output(&[], Some(&path));
        assert!(matches!(result, Err(OutputError::File { .. })));
    }
}
