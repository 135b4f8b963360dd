use crate::config::types::{Config, OutputConfig, ScraperConfig, TargetEntry, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_targets(&config.targets)?;
    Ok(())
}

/// Validates scraper behavior configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 || config.max_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be between 1 and 10, got {}",
            config.max_attempts
        )));
    }

    if config.request_timeout_ms < 1000 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_ms must be >= 1000ms, got {}ms",
            config.request_timeout_ms
        )));
    }

    if config.backoff_base_ms < 1 {
        return Err(ConfigError::Validation(
            "backoff_base_ms must be >= 1ms".to_string(),
        ));
    }

    if config.delay_min_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "delay_min_ms must be >= 100ms, got {}ms",
            config.delay_min_ms
        )));
    }

    if config.delay_max_ms < config.delay_min_ms {
        return Err(ConfigError::Validation(format!(
            "delay_max_ms ({}ms) must be >= delay_min_ms ({}ms)",
            config.delay_max_ms, config.delay_min_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate scraper name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    // Validate contact email (basic validation)
    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.profiles_path.is_empty() {
        return Err(ConfigError::Validation(
            "profiles_path cannot be empty".to_string(),
        ));
    }

    if config.companies_path.is_empty() {
        return Err(ConfigError::Validation(
            "companies_path cannot be empty".to_string(),
        ));
    }

    if config.profiles_path == config.companies_path {
        return Err(ConfigError::Validation(
            "profiles_path and companies_path must differ (the two kinds have different schemas)"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validates target entries
fn validate_targets(targets: &[TargetEntry]) -> Result<(), ConfigError> {
    if targets.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[targets]] entry is required".to_string(),
        ));
    }

    for entry in targets {
        let url = Url::parse(&entry.url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid target URL '{}': {}", entry.url, e)))?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::Validation(format!(
                "Target URL '{}' must use http or https scheme",
                entry.url
            )));
        }
    }

    Ok(())
}

/// Basic email validation: one '@' with non-empty local part and a
/// domain containing a dot
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = email.split('@').collect();

    if parts.len() != 2 || parts[0].is_empty() || !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid contact_email: '{}'",
            email
        )));
    }

    Ok(())
}
