use crate::config::types::{
    Config, CrawlerConfig, ExtractConfig, FetchConfig, SearchConfig, StorageConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetch_config(&config.fetch)?;
    validate_extract_config(&config.extract)?;
    validate_search_config(&config.search)?;
    validate_storage_config(&config.storage)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.root.trim().is_empty() {
        return Err(ConfigError::Validation(
            "root cannot be empty (set [crawler] root or pass --root)".to_string(),
        ));
    }

    let root = Url::parse(&config.root)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root '{}': {}", config.root, e)))?;

    if root.scheme() != "http" && root.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Root '{}' must use http or https",
            config.root
        )));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    validate_domain_suffix(&config.domain_suffix)?;

    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    if config.timeout_ms < 10 {
        return Err(ConfigError::Validation(format!(
            "timeout_ms must be >= 10ms, got {}ms",
            config.timeout_ms
        )));
    }

    if config.max_retry_delay_ms < config.retry_delay_ms {
        return Err(ConfigError::Validation(format!(
            "max_retry_delay_ms ({}) must be >= retry_delay_ms ({})",
            config.max_retry_delay_ms, config.retry_delay_ms
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates content extraction configuration
fn validate_extract_config(config: &ExtractConfig) -> Result<(), ConfigError> {
    if config.content_classes.is_empty() && config.table_classes.is_empty() {
        return Err(ConfigError::Validation(
            "at least one content class or table class is required".to_string(),
        ));
    }

    for class in config.content_classes.iter().chain(&config.table_classes) {
        validate_class_name(class)?;
    }

    Ok(())
}

/// Validates query presentation configuration
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.max_results < 1 {
        return Err(ConfigError::Validation(format!(
            "max_results must be >= 1, got {}",
            config.max_results
        )));
    }
    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates a host suffix such as "utk.edu"
///
/// Labels are compared verbatim against the tail of a host, so numeric labels
/// (e.g. "0.1" for loopback hosts) are accepted.
fn validate_domain_suffix(suffix: &str) -> Result<(), ConfigError> {
    if suffix.is_empty() {
        return Err(ConfigError::InvalidSuffix(
            "Domain suffix cannot be empty".to_string(),
        ));
    }

    for label in suffix.split('.') {
        if label.is_empty() {
            return Err(ConfigError::InvalidSuffix(format!(
                "Domain suffix '{}' contains an empty label",
                suffix
            )));
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ConfigError::InvalidSuffix(format!(
                "Domain suffix '{}' contains invalid characters",
                suffix
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(ConfigError::InvalidSuffix(format!(
                "Label '{}' in domain suffix '{}' cannot start or end with '-'",
                label, suffix
            )));
        }
    }

    Ok(())
}

/// Validates a CSS class name used to build a selector
fn validate_class_name(class: &str) -> Result<(), ConfigError> {
    let mut chars = class.chars();

    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '-');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if !valid_start || !valid_rest {
        return Err(ConfigError::InvalidClass(format!(
            "'{}' is not a plain CSS class name",
            class
        )));
    }

    Ok(())
}
