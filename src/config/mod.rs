//! # Configuration Management
//!
//! Environment-driven configuration for the burnbox service. A `.env` file is
//! honoured when present; real environment variables win over it.

pub mod settings;

pub use settings::{
    ApiServerConfig, AppConfig, DatabaseConfig, IdentityProviderConfig, ObservabilityConfig,
    storage_backstop, DEFAULT_DATABASE_URL,
};

use crate::errors::{BurnboxError, Result};
use std::str::FromStr;

/// Top-level configuration handle used by the binary
pub type Config = AppConfig;

impl AppConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // A missing .env file is the normal case outside local development.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup and validate it
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_defaults = ApiServerConfig::default();
        let db_defaults = DatabaseConfig::default();
        let obs_defaults = ObservabilityConfig::default();

        let api = ApiServerConfig {
            bind_address: lookup("BURNBOX_API_BIND_ADDRESS").unwrap_or(api_defaults.bind_address),
            port: parse_var(&lookup, "PORT", api_defaults.port)?,
            request_timeout_seconds: parse_var(
                &lookup,
                "BURNBOX_API_REQUEST_TIMEOUT_SECONDS",
                api_defaults.request_timeout_seconds,
            )?,
        };

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").unwrap_or(db_defaults.url),
            max_connections: parse_var(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                db_defaults.max_connections,
            )?,
            min_connections: parse_var(
                &lookup,
                "DATABASE_MIN_CONNECTIONS",
                db_defaults.min_connections,
            )?,
            connect_timeout_seconds: parse_var(
                &lookup,
                "DATABASE_CONNECT_TIMEOUT_SECONDS",
                db_defaults.connect_timeout_seconds,
            )?,
            idle_timeout_seconds: parse_var(
                &lookup,
                "DATABASE_IDLE_TIMEOUT_SECONDS",
                db_defaults.idle_timeout_seconds,
            )?,
            auto_migrate: lookup("DATABASE_AUTO_MIGRATE")
                .map(|s| parse_flag(&s))
                .unwrap_or(db_defaults.auto_migrate),
            storage_timeout_ms: parse_var(
                &lookup,
                "BURNBOX_STORAGE_TIMEOUT_MS",
                db_defaults.storage_timeout_ms,
            )?,
        };

        let observability = ObservabilityConfig {
            log_level: lookup("BURNBOX_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(obs_defaults.log_level),
            json_logging: match lookup("BURNBOX_LOG_FORMAT") {
                Some(format) => parse_log_format(&format)?,
                None => obs_defaults.json_logging,
            },
            metrics_port: parse_var(&lookup, "BURNBOX_METRICS_PORT", obs_defaults.metrics_port)?,
        };

        let identity_provider = IdentityProviderConfig {
            enabled: lookup("BURNBOX_IDP_ENABLED").map(|s| parse_flag(&s)).unwrap_or(false),
            token_url: non_empty(lookup("BURNBOX_IDP_TOKEN_URL")),
            client_id: non_empty(lookup("BURNBOX_IDP_CLIENT_ID")),
            client_secret: non_empty(lookup("BURNBOX_IDP_CLIENT_SECRET")),
            scope: non_empty(lookup("BURNBOX_IDP_SCOPE")),
        };

        let config = Self { api, database, observability, identity_provider };
        config.validate()?;
        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| BurnboxError::config(format!("Invalid {} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

fn parse_log_format(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "json" => Ok(true),
        "text" | "pretty" => Ok(false),
        other => Err(BurnboxError::config(format!(
            "Invalid BURNBOX_LOG_FORMAT '{}': expected 'text' or 'json'",
            other
        ))),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
