//! Output serialization
//!
//! This module turns scraped records into files:
//! - `record` - projection onto the caller's field list
//! - `json` / `csv_output` - format writers
//! - `stats` - end-of-run summary
//!
//! The pipeline core hands over finished record sequences; nothing here
//! runs concurrently with scrape tasks, so an interrupted batch never
//! leaves a partially-written file behind.

pub mod csv_output;
pub mod json;
pub mod record;
pub mod stats;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use record::{project, OutputRecord, Projectable, FIELD_NOT_FOUND};
pub use stats::RunSummary;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    /// Parses a format id from config or CLI
    pub fn parse(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }

    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Writes records to a file in the requested format
pub fn write_records(
    records: &[OutputRecord],
    fields: &[String],
    format: OutputFormat,
    path: &Path,
) -> OutputResult<()> {
    match format {
        OutputFormat::Json => json::save_to_json(records, path),
        OutputFormat::Csv => csv_output::save_to_csv(records, fields, path),
    }
}

/// Builds an output path carrying the format's extension
///
/// A caller-supplied name keeps its directory and stem; any extension it
/// carries is replaced so the file always matches the configured format.
pub fn output_path(name: &str, format: OutputFormat) -> PathBuf {
    PathBuf::from(name).with_extension(format.extension())
}

/// Builds a per-query output filename from the query text
pub fn query_path(query: &str, format: OutputFormat) -> PathBuf {
    let mut safe = sanitize_filename::sanitize(query).replace(' ', "_");
    if safe.is_empty() {
        safe = "query".to_string();
    }
    PathBuf::from(format!("{}.{}", safe, format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("CSV"), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::parse("xml"), None);
    }

    #[test]
    fn test_output_path_replaces_extension() {
        let path = output_path("results.json", OutputFormat::Csv);
        assert_eq!(path, PathBuf::from("results.csv"));
    }

    #[test]
    fn test_output_path_adds_extension() {
        let path = output_path("my_results", OutputFormat::Json);
        assert_eq!(path, PathBuf::from("my_results.json"));
    }

    #[test]
    fn test_output_path_keeps_directory() {
        let path = output_path("out/results", OutputFormat::Json);
        assert_eq!(path, PathBuf::from("out/results.json"));
    }

    #[test]
    fn test_query_path_sanitizes() {
        let path = query_path("rust async: how?", OutputFormat::Json);
        let name = path.to_string_lossy();
        assert!(name.ends_with(".json"));
        assert!(!name.contains(' '));
        assert!(!name.contains('?'));
    }

    #[test]
    fn test_query_path_empty_query() {
        let path = query_path("", OutputFormat::Csv);
        assert_eq!(path, PathBuf::from("query.csv"));
    }
}
