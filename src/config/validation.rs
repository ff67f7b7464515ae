use crate::config::processor::ProcessorConfig;
use crate::config::types::{Config, CrawlerConfig, UserAgentConfig};
use crate::ConfigError;
use std::time::Duration;
use url::Url;

const MAX_TIMEOUT_SECS: u64 = 300;
const MIN_TIMEOUT: Duration = Duration::from_secs(1);
const MAX_TIMEOUT: Duration = Duration::from_secs(MAX_TIMEOUT_SECS);
const MAX_REQUEST_INTERVAL: Duration = Duration::from_secs(3600);

/// Validates the file configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates the run parameters handed to the engine
pub fn validate_processor_config(config: &ProcessorConfig) -> Result<(), ConfigError> {
    match config.root_url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigError::InvalidUrl(format!(
                "Root sitemap URL must use http or https, got '{}'",
                other
            )))
        }
    }

    validate_limit(config.limit)?;
    if config.timeout < MIN_TIMEOUT || config.timeout > MAX_TIMEOUT {
        return Err(ConfigError::Validation(format!(
            "timeout must be between {}s and {}s, got {:?}",
            MIN_TIMEOUT.as_secs(),
            MAX_TIMEOUT.as_secs(),
            config.timeout
        )));
    }

    if config.request_interval > MAX_REQUEST_INTERVAL {
        return Err(ConfigError::Validation(format!(
            "request interval must be <= {}s, got {:?}",
            MAX_REQUEST_INTERVAL.as_secs(),
            config.request_interval
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }

    if config.output_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    if config.state_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "state file path cannot be empty".to_string(),
        ));
    }

    if config.state_path == config.output_path {
        return Err(ConfigError::Validation(format!(
            "state file and output file must differ, both are '{}'",
            config.output_path.display()
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_limit(config.limit)?;
    validate_timeout(config.timeout_secs)?;

    if config.request_interval_ms > MAX_REQUEST_INTERVAL.as_millis() as u64 {
        return Err(ConfigError::Validation(format!(
            "request-interval-ms must be <= {}, got {}",
            MAX_REQUEST_INTERVAL.as_millis(),
            config.request_interval_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
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

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;
    }

    validate_email(&config.contact_email)?;

    Ok(())
}

fn validate_limit(limit: Option<usize>) -> Result<(), ConfigError> {
    if limit == Some(0) {
        return Err(ConfigError::Validation(
            "limit must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

fn validate_timeout(timeout_secs: u64) -> Result<(), ConfigError> {
    if timeout_secs < 1 || timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout must be between 1 and {} seconds, got {}",
            MAX_TIMEOUT_SECS, timeout_secs
        )));
    }
    Ok(())
}

/// Basic email validation
pub fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact-email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    // Domain part should contain at least one dot
    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
