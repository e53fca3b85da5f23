//! Configuration loading and validation
//!
//! Configuration comes from a TOML file with per-section defaults; the
//! CLI layer merges its overrides on top and re-validates.

pub mod parser;
pub mod types;
pub mod validation;

pub use parser::load_config;
pub use types::{Config, DomainEntry, OutputConfig, ScrapeConfig, SearchConfig};
pub use validation::validate;
