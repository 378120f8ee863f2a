//! Configuration schema types
//!
//! Every section has defaults, so an empty file (or no file at all, via
//! [`HolonetConfig::default`]) yields a working configuration against the
//! public databank and SWAPI mirrors.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Main Holonet configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolonetConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Canonical source (databank) connection
    #[serde(default)]
    pub databank: DatabankConfig,

    /// Reference source (SWAPI) connection
    #[serde(default)]
    pub swapi: SwapiConfig,

    /// Reference catalog cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Matching and relation resolution settings
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HolonetConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.databank.validate()?;
        self.swapi.validate()?;
        self.cache.validate()?;
        self.enrichment.validate()?;
        self.logging.validate()?;

        let envelope = self.swapi.retry.envelope(self.swapi.timeout());
        if self.cache.fetch_timeout() < envelope {
            return Err(format!(
                "cache.fetch_timeout_seconds ({}) must cover every SWAPI retry ({}s with swapi.timeout_seconds = {})",
                self.cache.fetch_timeout_seconds,
                envelope.as_secs_f64().ceil() as u64,
                self.swapi.timeout_seconds
            ));
        }

        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Retry configuration for HTTP requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// A policy that makes exactly one attempt
    pub fn none() -> Self {
        Self {
            max_retries: 1,
            ..Self::default()
        }
    }

    /// Number of attempts made, never less than one
    pub fn attempts(&self) -> usize {
        self.max_retries.max(1)
    }

    /// Delay before the attempt following failed attempt number `attempt`
    pub fn delay_after(&self, attempt: usize) -> Duration {
        let exponent = attempt.saturating_sub(1) as f64;
        let delay_ms = (self.initial_delay_ms as f64 * self.backoff_multiplier.powf(exponent)) as u64;
        Duration::from_millis(delay_ms.min(self.max_delay_ms))
    }

    /// Longest a request can take when every attempt runs to `request_timeout`
    pub fn envelope(&self, request_timeout: Duration) -> Duration {
        let attempts = self.attempts();
        let waits: Duration = (1..attempts).map(|attempt| self.delay_after(attempt)).sum();
        request_timeout * attempts as u32 + waits
    }

    fn validate(&self, section: &str) -> Result<(), String> {
        if self.max_retries == 0 || self.max_retries > 10 {
            return Err(format!(
                "{section}.retry.max_retries must be between 1 and 10, got {}",
                self.max_retries
            ));
        }
        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "{section}.retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(format!(
                "{section}.retry.initial_delay_ms ({}) cannot exceed max_delay_ms ({})",
                self.initial_delay_ms, self.max_delay_ms
            ));
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Databank (canonical source) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabankConfig {
    /// Base URL of the databank API, without a trailing slash
    #[serde(default = "default_databank_base_url")]
    pub base_url: String,

    /// Items requested per listing page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl DatabankConfig {
    fn validate(&self) -> Result<(), String> {
        validate_base_url("databank.base_url", &self.base_url)?;

        if !(1..=500).contains(&self.page_size) {
            return Err(format!(
                "databank.page_size must be between 1 and 500, got {}",
                self.page_size
            ));
        }

        if self.timeout_seconds == 0 {
            return Err("databank.timeout_seconds must be > 0".to_string());
        }

        self.retry.validate("databank")
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for DatabankConfig {
    fn default() -> Self {
        Self {
            base_url: default_databank_base_url(),
            page_size: default_page_size(),
            timeout_seconds: default_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

/// SWAPI (reference source) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapiConfig {
    /// Base URL of the SWAPI mirror, without a trailing slash
    #[serde(default = "default_swapi_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl SwapiConfig {
    fn validate(&self) -> Result<(), String> {
        validate_base_url("swapi.base_url", &self.base_url)?;

        if self.timeout_seconds == 0 {
            return Err("swapi.timeout_seconds must be > 0".to_string());
        }

        self.retry.validate("swapi")
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for SwapiConfig {
    fn default() -> Self {
        Self {
            base_url: default_swapi_base_url(),
            timeout_seconds: default_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

/// Reference catalog cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a fetched value stays fresh
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Upper bound on fetching one reference record, retries included
    ///
    /// Catalog loads are bounded per request by the SWAPI client timeout
    /// instead, since a catalog spans many pages.
    #[serde(default = "default_fetch_timeout_seconds")]
    pub fetch_timeout_seconds: u64,
}

impl CacheConfig {
    fn validate(&self) -> Result<(), String> {
        if self.ttl_seconds == 0 {
            return Err("cache.ttl_seconds must be > 0".to_string());
        }
        if self.fetch_timeout_seconds == 0 {
            return Err("cache.fetch_timeout_seconds must be > 0".to_string());
        }
        Ok(())
    }

    /// Freshness window
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Deadline for one record fetch
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            fetch_timeout_seconds: default_fetch_timeout_seconds(),
        }
    }
}

/// One alias rule for the matcher
///
/// A rule applies when the canonical name contains `token`
/// (case-insensitively). It then accepts the first candidate whose name
/// contains any of `targets`, or `token` itself when `targets` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRule {
    /// Token looked for in the canonical name
    pub token: String,

    /// Tokens looked for in candidate names
    #[serde(default)]
    pub targets: Vec<String>,
}

impl AliasRule {
    /// Rule matching candidates that share `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            targets: Vec::new(),
        }
    }

    /// Rule mapping `token` to differently spelled candidate tokens
    pub fn with_targets(token: impl Into<String>, targets: &[&str]) -> Self {
        Self {
            token: token.into(),
            targets: targets.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Enrichment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Maximum in-flight fetches per relation group
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Ordered alias table consulted after exact and substring matching
    #[serde(default = "default_aliases")]
    pub aliases: Vec<AliasRule>,
}

impl EnrichmentConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 || self.max_concurrency > 100 {
            return Err(format!(
                "enrichment.max_concurrency must be between 1 and 100, got {}",
                self.max_concurrency
            ));
        }

        for rule in &self.aliases {
            if rule.token.trim().is_empty() {
                return Err("enrichment.aliases entries need a non-empty token".to_string());
            }
            if rule.targets.iter().any(|t| t.trim().is_empty()) {
                return Err(format!(
                    "enrichment.aliases rule '{}' has an empty target",
                    rule.token
                ));
            }
        }

        Ok(())
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            aliases: default_aliases(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_base_url(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }

    let url = Url::parse(value).map_err(|e| format!("{field} is not a valid URL: {e}"))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!(
            "{field} must start with http:// or https://, got {value}"
        ));
    }

    if value.ends_with('/') {
        return Err(format!("{field} must not end with '/'"));
    }

    Ok(())
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_databank_base_url() -> String {
    "https://starwars-databank-server.vercel.app/api/v1".to_string()
}

fn default_swapi_base_url() -> String {
    "https://swapi.py4e.com/api".to_string()
}

fn default_page_size() -> usize {
    50
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    250
}

fn default_max_delay_ms() -> u64 {
    4000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_ttl_seconds() -> u64 {
    300
}

fn default_fetch_timeout_seconds() -> u64 {
    60
}

fn default_max_concurrency() -> usize {
    10
}

fn default_aliases() -> Vec<AliasRule> {
    vec![AliasRule::new("vader"), AliasRule::new("skywalker")]
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
