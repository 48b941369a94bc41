//! # Metrics Collection
//!
//! Counters for the secret lifecycle plus the optional Prometheus exporter.
//! The `metrics` macros are no-ops until a recorder is installed, so these
//! helpers are always safe to call.

use crate::config::ObservabilityConfig;
use crate::errors::{BurnboxError, Result};
use metrics::{counter, describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

pub const SECRETS_CREATED: &str = "secrets_created_total";
pub const SECRETS_CONSUMED: &str = "secrets_consumed_total";
pub const SECRETS_CONSUME_MISSES: &str = "secrets_consume_misses_total";
pub const SECRETS_LISTED: &str = "secrets_listed_total";
pub const STORAGE_TIMEOUTS: &str = "storage_timeouts_total";
pub const HTTP_REQUESTS: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION: &str = "http_request_duration_seconds";

/// Install the Prometheus exporter when a metrics port is configured
pub fn init_metrics(config: &ObservabilityConfig) -> Result<()> {
    let Some(metrics_addr) = config.metrics_bind_address() else {
        info!("Metrics exporter disabled");
        return Ok(());
    };

    let socket_addr: SocketAddr = metrics_addr.parse().map_err(|e| {
        BurnboxError::config(format!("Invalid metrics bind address '{}': {}", metrics_addr, e))
    })?;

    PrometheusBuilder::new()
        .with_http_listener(socket_addr)
        .add_global_label("service", "burnbox")
        .install()
        .map_err(|e| {
            BurnboxError::config(format!("Failed to initialize metrics exporter: {}", e))
        })?;

    describe_metrics();
    info!(metrics_addr = %metrics_addr, "Metrics exporter listening");
    Ok(())
}

fn describe_metrics() {
    describe_counter!(SECRETS_CREATED, Unit::Count, "Secrets stored");
    describe_counter!(SECRETS_CONSUMED, Unit::Count, "Secrets returned and burned");
    describe_counter!(
        SECRETS_CONSUME_MISSES,
        Unit::Count,
        "Reads of a handle that was already consumed or never existed"
    );
    describe_counter!(SECRETS_LISTED, Unit::Count, "Owner listings served");
    describe_counter!(STORAGE_TIMEOUTS, Unit::Count, "Storage calls that hit their deadline");
    describe_counter!(HTTP_REQUESTS, Unit::Count, "HTTP requests handled");
    describe_histogram!(HTTP_REQUEST_DURATION, Unit::Seconds, "HTTP request latency");
}

pub fn record_secret_created(owned: bool) {
    counter!(SECRETS_CREATED, "owned" => owned.to_string()).increment(1);
}

pub fn record_secret_consumed() {
    counter!(SECRETS_CONSUMED).increment(1);
}

pub fn record_secret_consume_miss() {
    counter!(SECRETS_CONSUME_MISSES).increment(1);
}

pub fn record_secrets_listed() {
    counter!(SECRETS_LISTED).increment(1);
}

pub fn record_storage_timeout(operation: &'static str) {
    counter!(STORAGE_TIMEOUTS, "operation" => operation).increment(1);
}
