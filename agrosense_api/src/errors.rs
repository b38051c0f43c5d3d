//! Error types for the API client.

use std::collections::BTreeMap;

/// Errors that can occur when making API requests or decoding their bodies.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or client build failure).
    #[error("Request failed")]
    RequestFailed,
    /// The API rejected the bearer token (HTTP 401).
    #[error("Unauthorized: the session token is missing or expired")]
    Unauthorized,
    /// The API returned a non-success status.
    #[error("Request failed with status {status}: {message}")]
    HttpStatus { status: u16, message: String },
    /// The API answered 2xx but flagged the operation as unsuccessful.
    #[error("API error: {message}")]
    Api {
        message: String,
        errors: BTreeMap<String, Vec<String>>,
    },
    /// The body was not JSON or did not have the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
    /// A list endpoint returned something that is neither an array, a
    /// resource envelope, nor a length-aware page.
    #[error("Unrecognized list payload: {0}")]
    UnrecognizedPayload(String),
}

impl Error {
    /// Per-field validation messages when the API returned any.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            Error::Api { errors, .. } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }
}
