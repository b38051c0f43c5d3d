//! Error types for the library layer.

use std::fmt;

use crate::config::ConfigError;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding cache, serialization, configuration and input validation failures.
#[derive(Debug)]
pub enum AgroSenseError {
    /// An error from the underlying API client.
    Api(agrosense_api::Error),
    /// A cache operation failed (e.g. deserialization of cached data).
    Cache(String),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// Environment configuration is invalid.
    Config(ConfigError),
}

impl AgroSenseError {
    /// Whether retrying the same request could succeed: transport failures,
    /// HTTP 429 and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(api_err) => match api_err {
                agrosense_api::Error::RequestFailed => true,
                agrosense_api::Error::HttpStatus { status, .. } => *status == 429 || *status >= 500,
                _ => false,
            },
            _ => false,
        }
    }
}

impl fmt::Display for AgroSenseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Cache(msg) => write!(f, "Cache error: {}", msg),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for AgroSenseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<agrosense_api::Error> for AgroSenseError {
    fn from(e: agrosense_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for AgroSenseError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<ConfigError> for AgroSenseError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_statuses() {
        let err = |status| {
            AgroSenseError::Api(agrosense_api::Error::HttpStatus {
                status,
                message: String::new(),
            })
        };
        assert!(err(429).is_retryable());
        assert!(err(503).is_retryable());
        assert!(!err(404).is_retryable());
        assert!(!err(422).is_retryable());
        assert!(AgroSenseError::Api(agrosense_api::Error::RequestFailed).is_retryable());
    }

    #[test]
    fn non_api_errors_not_retryable() {
        assert!(!AgroSenseError::InvalidInput("x".into()).is_retryable());
        assert!(!AgroSenseError::Api(agrosense_api::Error::Unauthorized).is_retryable());
    }
}
