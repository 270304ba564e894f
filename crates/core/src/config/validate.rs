use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - TMDB API key and base URL are set, timeout is not 0
/// - Scroll threshold is a finite, non-negative number
/// - Command buffer is not 0
/// - Image base URL is set
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.tmdb.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "tmdb.api_key cannot be empty".to_string(),
        ));
    }
    if config.tmdb.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "tmdb.base_url cannot be empty".to_string(),
        ));
    }
    if config.tmdb.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "tmdb.timeout_secs cannot be 0".to_string(),
        ));
    }

    let threshold = config.feed.scroll_threshold;
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "feed.scroll_threshold must be a non-negative number, got {}",
            threshold
        )));
    }
    if config.feed.command_buffer == 0 {
        return Err(ConfigError::ValidationError(
            "feed.command_buffer cannot be 0".to_string(),
        ));
    }

    if config.images.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "images.base_url cannot be empty".to_string(),
        ));
    }

    Ok(())
}
