use serde::Deserialize;

/// Main configuration structure for trawl
///
/// Every section has defaults mirroring a bare install, so a missing
/// config file is equivalent to an empty one.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scrape: ScrapeConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Domains excluded from page scraping
    #[serde(default = "default_skip_list")]
    pub skip: Vec<DomainEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scrape: ScrapeConfig::default(),
            search: SearchConfig::default(),
            output: OutputConfig::default(),
            skip: default_skip_list(),
        }
    }
}

impl Config {
    /// Skip-list domains as plain strings
    pub fn skip_domains(&self) -> Vec<String> {
        self.skip.iter().map(|entry| entry.domain.clone()).collect()
    }
}

/// Scrape performance and retry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    /// Number of result URLs sampled and scraped per query
    #[serde(rename = "num-urls", default = "default_num_urls")]
    pub num_urls: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-workers", default = "default_max_workers")]
    pub max_workers: u32,

    /// Total fetch attempts per URL
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            num_urls: default_num_urls(),
            timeout_secs: default_timeout_secs(),
            max_workers: default_max_workers(),
            retries: default_retries(),
        }
    }
}

/// Search engine selection
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Engine id: "google", "bing", or "duckduckgo"
    #[serde(default = "default_engine")]
    pub engine: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Output format: "json" or "csv"
    #[serde(default = "default_format")]
    pub format: String,

    /// Ordered field list projected into each output record
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            fields: default_fields(),
        }
    }
}

/// Domain excluded from scraping
#[derive(Debug, Clone, Deserialize)]
pub struct DomainEntry {
    /// Domain name; matches itself and any subdomain
    pub domain: String,
}

fn default_num_urls() -> u32 {
    5
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_workers() -> u32 {
    5
}

fn default_retries() -> u32 {
    3
}

fn default_engine() -> String {
    "google".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

fn default_fields() -> Vec<String> {
    ["url", "title", "description", "full_content"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_skip_list() -> Vec<DomainEntry> {
    vec![DomainEntry {
        domain: "twitter.com".to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.scrape.num_urls, 5);
        assert_eq!(config.scrape.timeout_secs, 10);
        assert_eq!(config.scrape.max_workers, 5);
        assert_eq!(config.scrape.retries, 3);
        assert_eq!(config.search.engine, "google");
        assert_eq!(config.output.format, "json");
        assert_eq!(
            config.output.fields,
            vec!["url", "title", "description", "full_content"]
        );
        assert_eq!(config.skip_domains(), vec!["twitter.com"]);
    }
}
