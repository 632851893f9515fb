use crate::config::types::{Config, CrawlerConfig, FilterConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_filter_config(&config.filter)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.limit < 1 {
        return Err(ConfigError::Validation(format!(
            "limit must be >= 1, got {}",
            config.limit
        )));
    }

    if config.workers < 1 || config.workers > 64 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 64, got {}",
            config.workers
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    for ext in &config.skip_extensions {
        if ext.is_empty() {
            return Err(ConfigError::Validation(
                "skip-extensions cannot contain an empty entry".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates duplicate filter sizing
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    if config.bits < 8 {
        return Err(ConfigError::Validation(format!(
            "filter bits must be >= 8, got {}",
            config.bits
        )));
    }

    if config.hashes < 1 || config.hashes > 16 {
        return Err(ConfigError::Validation(format!(
            "filter hashes must be between 1 and 16, got {}",
            config.hashes
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Non-empty, alphanumeric + hyphens only so it is usable as a robots.txt token
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if !config.contact_url.is_empty() {
        Url::parse(&config.contact_url).map_err(|e| {
            ConfigError::Validation(format!("Invalid contact-url: {}", e))
        })?;
    }

    Ok(())
}
