use crate::config::types::{
    CacheConfig, Config, CrawlerConfig, Engine, MatcherConfig, OutputConfig, RendererConfig,
    UserAgentConfig,
};
use crate::links::AboutPatternSet;
use crate::url::parse_seed;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_renderer_config(&config.renderer)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_cache_config(&config.cache)?;
    validate_matcher_config(&config.matcher)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    for seed in &config.seeds {
        parse_seed(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;
    }

    // download_delay_ms >= 0 is always true for u64; zero disables the delay

    Ok(())
}

/// Validates renderer configuration
fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    if config.engine == Engine::Webdriver {
        let url = Url::parse(&config.webdriver_url).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "Invalid webdriver-url '{}': {}",
                config.webdriver_url, e
            ))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "webdriver-url '{}' must use http or https",
                config.webdriver_url
            )));
        }
    }

    if config.ready_timeout_secs < 1 || config.ready_timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "ready-timeout-secs must be between 1 and 120, got {}",
            config.ready_timeout_secs
        )));
    }

    if config.window_width == 0 || config.window_height == 0 {
        return Err(ConfigError::Validation(format!(
            "window size must be non-zero, got {}x{}",
            config.window_width, config.window_height
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent value cannot be empty".to_string(),
        ));
    }

    // Must be usable as an HTTP header value
    if config.value.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user-agent value must not contain control characters, got '{}'",
            config.value.escape_debug()
        )));
    }

    Ok(())
}

/// Validates cache configuration
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.enabled && config.expiration_secs == 0 {
        return Err(ConfigError::Validation(
            "cache expiration-secs must be > 0 when the cache is enabled".to_string(),
        ));
    }

    if let Some(directory) = &config.directory {
        if directory.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cache directory cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates the about-link patterns by compiling them
fn validate_matcher_config(config: &MatcherConfig) -> Result<(), ConfigError> {
    if config.patterns.is_empty() {
        return Err(ConfigError::Validation(
            "matcher needs at least one pattern".to_string(),
        ));
    }

    AboutPatternSet::new(&config.patterns)
        .map_err(|e| ConfigError::InvalidPattern(e.to_string()))?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
