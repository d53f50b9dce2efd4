//! Login credentials.

use serde::{Deserialize, Serialize};

/// A stored credential. The hash never leaves the server.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub login: String,
    pub password_hash: String,
}

/// Request body for signup and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Response body for a successful signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub login: String,
}
