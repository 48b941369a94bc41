//! # burnbox
//!
//! Burn-after-reading secret sharing over HTTP. A client stores a message and
//! receives an opaque handle; the first read through that handle returns the
//! message and deletes it, every later read gets 404. Secrets may carry an
//! owner id so the owner can list what is still pending.
//!
//! ## Architecture
//!
//! ```text
//! HTTP (axum) → SecretService → SecretStore / UserDirectory → PostgreSQL
//!      ↓               ↓
//!  tracing/metrics   storage deadline
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use burnbox::{
//!     api::{start_api_server, ApiState},
//!     services::SecretService,
//!     storage::{create_pool, SqlxSecretRepository, SqlxUserRepository},
//!     Config, Result,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env()?;
//!     let pool = create_pool(&config.database).await?;
//!     let service = SecretService::new(
//!         Arc::new(SqlxSecretRepository::new(pool.clone())),
//!         Arc::new(SqlxUserRepository::new(pool)),
//!     );
//!     start_api_server(config.api, ApiState::new(service)).await
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod services;
pub mod storage;

// Re-export commonly used types and traits
pub use config::Config;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
