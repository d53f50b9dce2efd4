//! Configuration module for the e-sports backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

/// Default per-file upload cap (10 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default lifetime of issued login tokens.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store connection string
    pub database_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Secret used to sign login tokens
    pub jwt_secret: String,
    /// Whether the secret came from the environment or was generated at startup
    pub jwt_secret_generated: bool,
    /// Lifetime of issued tokens in seconds
    pub token_ttl_secs: i64,
    /// Per-file upload cap in bytes
    pub max_upload_bytes: usize,
    /// Require a bearer token on write routes
    pub require_auth: bool,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// A configuration value that could not be parsed.
#[derive(Debug)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid {} value: {:?}", self.variable, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables (and a `.env` file, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "sqlite:./data/esports.sqlite?mode=rwc".to_string());

        let bind_addr = parse_var(
            &lookup,
            "ESPORTS_BIND_ADDR",
            "0.0.0.0:3000".parse::<SocketAddr>().ok(),
        )?;

        let (jwt_secret, jwt_secret_generated) = match lookup("ESPORTS_JWT_SECRET") {
            Some(secret) if !secret.is_empty() => (secret, false),
            _ => (uuid::Uuid::new_v4().simple().to_string(), true),
        };

        let token_ttl_secs = parse_var(
            &lookup,
            "ESPORTS_TOKEN_TTL_SECS",
            Some(DEFAULT_TOKEN_TTL_SECS),
        )?;

        let max_upload_bytes = parse_var(
            &lookup,
            "ESPORTS_MAX_UPLOAD_BYTES",
            Some(DEFAULT_MAX_UPLOAD_BYTES),
        )?;

        let require_auth = parse_var(&lookup, "ESPORTS_REQUIRE_AUTH", Some(false))?;

        let log_level = lookup("ESPORTS_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            database_url,
            bind_addr,
            jwt_secret,
            jwt_secret_generated,
            token_ttl_secs,
            max_upload_bytes,
            require_auth,
            log_level,
        })
    }

    /// Request body limit for multipart routes: two capped files plus form fields.
    pub fn body_limit(&self) -> usize {
        self.max_upload_bytes.saturating_mul(2).saturating_add(64 * 1024)
    }
}

fn parse_var<F, T>(
    lookup: &F,
    variable: &'static str,
    default: Option<T>,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(variable) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError { variable, value }),
        None => default.ok_or(ConfigError {
            variable,
            value: String::new(),
        }),
    }
}
