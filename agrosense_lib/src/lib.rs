//! Library layer for AgroSense: cached API client, configuration and input validation.
//!
//! Wraps the `agrosense_api` crate with an in-memory TTL cache, retries
//! with exponential backoff, environment-driven configuration and
//! validation of user-supplied filters.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod validation;

pub use agrosense_api;
pub use agrosense_api::types;
pub use agrosense_api::{ControlUnitQuery, ParcelQuery, Query, SensorQuery};

pub use client::CachedClient;
pub use config::{ClientConfig, ConfigError, RetryConfig};
pub use error::AgroSenseError;
