//! Client configuration read from `AGROSENSE_*` environment variables.

use std::time::Duration;

use rand::Rng;

pub const ENV_API_URL: &str = "AGROSENSE_API_URL";
pub const ENV_API_TOKEN: &str = "AGROSENSE_API_TOKEN";
pub const ENV_TIMEOUT_MS: &str = "AGROSENSE_TIMEOUT_MS";
pub const ENV_RETRY_MAX: &str = "AGROSENSE_RETRY_MAX";
pub const ENV_RETRY_BASE_MS: &str = "AGROSENSE_RETRY_BASE_MS";
pub const ENV_RETRY_MAX_MS: &str = "AGROSENSE_RETRY_MAX_MS";
pub const ENV_CACHE_TTL_SECS: &str = "AGROSENSE_CACHE_TTL_SECS";

/// Errors from reading configuration values.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be an http(s) URL, got '{value}'")]
    InvalidUrl { key: &'static str, value: String },
}

/// Exponential backoff parameters for retryable requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
        }
    }
}

impl RetryConfig {
    /// Disables retries entirely.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (1-based): doubles each attempt,
    /// capped at `max_delay_ms`, with ±20% jitter.
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(30) as u32;
        let exp = 1u64 << shift;
        let base = self
            .base_delay_ms
            .saturating_mul(exp)
            .min(self.max_delay_ms);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base as f64 * jitter) as u64)
    }
}

/// Everything needed to build a [`crate::CachedClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: agrosense_api::DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: agrosense_api::DEFAULT_TIMEOUT,
            cache_ttl: Duration::from_secs(300),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Reads configuration from the process environment. Unset variables
    /// keep their defaults; set but malformed ones are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = match lookup(ENV_API_URL) {
            Some(url) => validate_url(ENV_API_URL, url.trim())?,
            None => defaults.base_url,
        };
        let timeout = match lookup(ENV_TIMEOUT_MS) {
            Some(v) => Duration::from_millis(parse_u64(ENV_TIMEOUT_MS, &v)?),
            None => defaults.timeout,
        };
        let cache_ttl = match lookup(ENV_CACHE_TTL_SECS) {
            Some(v) => Duration::from_secs(parse_u64(ENV_CACHE_TTL_SECS, &v)?),
            None => defaults.cache_ttl,
        };
        let retry = RetryConfig {
            max_retries: match lookup(ENV_RETRY_MAX) {
                Some(v) => parse_u64(ENV_RETRY_MAX, &v)? as usize,
                None => defaults.retry.max_retries,
            },
            base_delay_ms: match lookup(ENV_RETRY_BASE_MS) {
                Some(v) => parse_u64(ENV_RETRY_BASE_MS, &v)?,
                None => defaults.retry.base_delay_ms,
            },
            max_delay_ms: match lookup(ENV_RETRY_MAX_MS) {
                Some(v) => parse_u64(ENV_RETRY_MAX_MS, &v)?,
                None => defaults.retry.max_delay_ms,
            },
        };

        Ok(Self {
            base_url,
            token: lookup(ENV_API_TOKEN).map(|t| t.trim().to_string()),
            timeout,
            cache_ttl,
            retry,
        })
    }

    /// Overrides the base URL, validating it first.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = validate_url(ENV_API_URL, base_url.trim())?;
        Ok(self)
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}

fn parse_u64(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

fn validate_url(key: &'static str, value: &str) -> Result<String, ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(ConfigError::InvalidUrl {
            key,
            value: value.to_string(),
        })
    }
}
