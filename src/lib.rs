//! Trawl: a search-result scraping pipeline
//!
//! This crate fetches search-engine result pages, extracts the organic
//! results, and scrapes the linked pages with bounded concurrency and
//! retry/backoff, producing uniform records for JSON or CSV output.

pub mod config;
pub mod engine;
pub mod output;
pub mod scrape;

use thiserror::Error;

/// Main error type for trawl operations
#[derive(Debug, Error)]
pub enum TrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] scrape::FetchError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No search query provided")]
    NoQuery,

    #[error("Input file '{0}' contains no queries")]
    EmptyInput(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for trawl operations
pub type Result<T> = std::result::Result<T, TrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use engine::{Engine, EngineProfile};
pub use output::{project, OutputFormat, OutputRecord};
pub use scrape::{Coordinator, Fetcher, RetryPolicy, ScrapedPage, SearchResult};
