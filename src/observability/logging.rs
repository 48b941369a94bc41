//! # Structured Logging
//!
//! Subscriber setup and span helpers built on the tracing ecosystem.
//! `BURNBOX_LOG_FORMAT=json` switches the formatter to one JSON object per line.

use crate::config::{AppConfig, ObservabilityConfig};
use crate::errors::{BurnboxError, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Create a tracing span for request tracking.
///
/// ```rust,ignore
/// let span = request_span!("GET", "/secret/{id}");
/// let span = request_span!("POST", "/secret", user_id = 7);
/// ```
#[macro_export]
macro_rules! request_span {
    ($method:expr, $path:expr) => {
        tracing::info_span!(
            "http_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4(),
            status = tracing::field::Empty
        )
    };
    ($method:expr, $path:expr, $($field:tt)*) => {
        tracing::info_span!(
            "http_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4(),
            status = tracing::field::Empty,
            $($field)*
        )
    };
}

/// Install the global subscriber.
///
/// Fails if the filter directive is invalid or a subscriber is already set.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level).map_err(|e| {
        BurnboxError::config_with_source(
            format!("Invalid log filter '{}'", config.log_level),
            Box::new(e),
        )
    })?;

    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json_logging {
        registry.with(fmt::layer().json().with_current_span(true).with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    installed.map_err(|e| {
        BurnboxError::config_with_source("Failed to install tracing subscriber", Box::new(e))
    })
}

/// Log configuration at startup
pub fn log_config_info(config: &AppConfig) {
    tracing::info!(
        api_address = %config.api.socket_address(),
        database_url = %crate::storage::pool::sanitize_url(&config.database.url),
        auto_migrate = config.database.auto_migrate,
        storage_timeout_ms = config.database.storage_timeout_ms,
        metrics_port = config.observability.metrics_port,
        json_logging = config.observability.json_logging,
        identity_provider_enabled = config.identity_provider.enabled,
        "Burnbox configuration"
    );
}
