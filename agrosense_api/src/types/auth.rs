//! Session types for the `/auth` endpoints.

use serde::{Deserialize, Serialize};

/// Login payload. `login` is either a phone number or an email address.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginCredentials {
    pub login: String,
    pub password: String,
}

/// Authenticated user profile.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    /// Some deployments use numeric ids, others UUIDs.
    #[serde(deserialize_with = "crate::types::de::string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Result of a successful login.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}
