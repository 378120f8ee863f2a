//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::HolonetConfig;
use crate::domain::errors::HolonetError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
});

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into HolonetConfig
/// 4. Applies environment variable overrides (HOLONET_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`HolonetError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, the TOML is malformed, or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use holonet::config::loader::load_config;
///
/// let config = load_config("holonet.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<HolonetConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(HolonetError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        HolonetError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Runs the same substitution, override and validation steps as
/// [`load_config`].
pub fn parse_config(contents: &str) -> Result<HolonetConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: HolonetConfig = toml::from_str(&contents)
        .map_err(|e| HolonetError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        HolonetError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are passed through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in ENV_PLACEHOLDER.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|m| m == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(HolonetError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Reads `name` and parses it, ignoring unset or unparsable values
fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|val| val.parse().ok())
}

/// Applies environment variable overrides using HOLONET_* prefix
///
/// Environment variables follow the pattern: HOLONET_<SECTION>_<KEY>
/// For example: HOLONET_SWAPI_BASE_URL, HOLONET_CACHE_TTL_SECONDS
fn apply_env_overrides(config: &mut HolonetConfig) {
    // Application
    if let Ok(val) = std::env::var("HOLONET_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Databank
    if let Ok(val) = std::env::var("HOLONET_DATABANK_BASE_URL") {
        config.databank.base_url = val;
    }
    if let Some(size) = env_parse("HOLONET_DATABANK_PAGE_SIZE") {
        config.databank.page_size = size;
    }
    if let Some(secs) = env_parse("HOLONET_DATABANK_TIMEOUT_SECONDS") {
        config.databank.timeout_seconds = secs;
    }
    if let Some(retries) = env_parse("HOLONET_DATABANK_MAX_RETRIES") {
        config.databank.retry.max_retries = retries;
    }

    // SWAPI
    if let Ok(val) = std::env::var("HOLONET_SWAPI_BASE_URL") {
        config.swapi.base_url = val;
    }
    if let Some(secs) = env_parse("HOLONET_SWAPI_TIMEOUT_SECONDS") {
        config.swapi.timeout_seconds = secs;
    }
    if let Some(retries) = env_parse("HOLONET_SWAPI_MAX_RETRIES") {
        config.swapi.retry.max_retries = retries;
    }

    // Cache
    if let Some(ttl) = env_parse("HOLONET_CACHE_TTL_SECONDS") {
        config.cache.ttl_seconds = ttl;
    }
    if let Some(secs) = env_parse("HOLONET_CACHE_FETCH_TIMEOUT_SECONDS") {
        config.cache.fetch_timeout_seconds = secs;
    }

    // Enrichment
    if let Some(limit) = env_parse("HOLONET_ENRICHMENT_MAX_CONCURRENCY") {
        config.enrichment.max_concurrency = limit;
    }

    // Logging
    if let Ok(val) = std::env::var("HOLONET_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("HOLONET_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("HOLONET_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
