//! # Error Handling
//!
//! Error handling for the burnbox service. Business-rule failures travel as
//! [`BurnboxError`] values from storage through the service to the HTTP layer,
//! where [`crate::api::error::ApiError`] turns them into responses.

pub mod types;

pub use types::{BurnboxError, Result};

/// Short alias used across the crate
pub type Error = BurnboxError;
