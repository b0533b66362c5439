use crate::config::types::{CrawlerSettings, Settings, UserAgentSettings};
use crate::ConfigError;
use url::Url;

/// Validates the entire settings structure
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    validate_crawler_settings(&settings.crawler)?;
    validate_user_agent_settings(&settings.user_agent)?;
    Ok(())
}

fn validate_crawler_settings(settings: &CrawlerSettings) -> Result<(), ConfigError> {
    let base = Url::parse(&settings.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            settings.base_url
        )));
    }

    if settings.max_tries < 1 || settings.max_tries > 100 {
        return Err(ConfigError::Validation(format!(
            "max-tries must be between 1 and 100, got {}",
            settings.max_tries
        )));
    }

    if !settings.max_backoff.is_finite() || settings.max_backoff < 1.0 {
        return Err(ConfigError::Validation(format!(
            "max-backoff must be >= 1, got {}",
            settings.max_backoff
        )));
    }

    if settings.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be > 0".to_string(),
        ));
    }

    if settings.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be > 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_user_agent_settings(settings: &UserAgentSettings) -> Result<(), ConfigError> {
    if settings.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !settings
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            settings.crawler_name
        )));
    }

    Url::parse(&settings.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    Ok(())
}
