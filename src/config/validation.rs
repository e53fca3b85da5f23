use crate::config::types::{Config, DomainEntry, OutputConfig, ScrapeConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scrape_config(&config.scrape)?;
    validate_output_config(&config.output)?;
    validate_skip_domains(&config.skip)?;
    Ok(())
}

/// Validates scrape performance settings
fn validate_scrape_config(config: &ScrapeConfig) -> Result<(), ConfigError> {
    if config.num_urls < 1 {
        return Err(ConfigError::Validation(format!(
            "num_urls must be >= 1, got {}",
            config.num_urls
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.max_workers < 1 || config.max_workers > 100 {
        return Err(ConfigError::Validation(format!(
            "max_workers must be between 1 and 100, got {}",
            config.max_workers
        )));
    }

    if config.retries < 1 || config.retries > 10 {
        return Err(ConfigError::Validation(format!(
            "retries must be between 1 and 10, got {}",
            config.retries
        )));
    }

    Ok(())
}

/// Validates output format and field list
///
/// The engine id is deliberately not validated here: unknown engines
/// fall back to the default at resolution time instead of aborting.
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if !matches!(config.format.as_str(), "json" | "csv") {
        return Err(ConfigError::Validation(format!(
            "format must be 'json' or 'csv', got '{}'",
            config.format
        )));
    }

    if config.fields.is_empty() {
        return Err(ConfigError::Validation(
            "fields cannot be empty".to_string(),
        ));
    }

    for field in &config.fields {
        if field.trim().is_empty() {
            return Err(ConfigError::Validation(
                "fields cannot contain blank entries".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates skip-list entries
fn validate_skip_domains(domains: &[DomainEntry]) -> Result<(), ConfigError> {
    for entry in domains {
        validate_domain_string(&entry.domain)?;
    }
    Ok(())
}

/// Validates a domain string
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::Validation(
            "skip domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_num_urls_rejected() {
        let mut config = Config::default();
        config.scrape.num_urls = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_retries_rejected() {
        let mut config = Config::default();
        config.scrape.retries = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_worker_range() {
        let mut config = Config::default();
        config.scrape.max_workers = 0;
        assert!(validate(&config).is_err());

        config.scrape.max_workers = 101;
        assert!(validate(&config).is_err());

        config.scrape.max_workers = 100;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let mut config = Config::default();
        config.output.format = "xml".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_fields_rejected() {
        let mut config = Config::default();
        config.output.fields = vec![];
        assert!(validate(&config).is_err());

        config.output.fields = vec!["url".to_string(), "  ".to_string()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unknown_engine_is_allowed() {
        // Unknown engines degrade to the default at resolution time
        let mut config = Config::default();
        config.search.engine = "altavista".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_domain_string() {
        assert!(validate_domain_string("example.com").is_ok());
        assert!(validate_domain_string("sub.example.com").is_ok());

        assert!(validate_domain_string("").is_err());
        assert!(validate_domain_string(".example.com").is_err());
        assert!(validate_domain_string("example.com.").is_err());
        assert!(validate_domain_string("exa mple.com").is_err());
        assert!(validate_domain_string("example..com").is_err());
    }
}
