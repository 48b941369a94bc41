//! # REST API Components
//!
//! HTTP routing, request/response bodies and error mapping for the secret
//! endpoints.

pub mod docs;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

#[cfg(test)]
pub mod test_utils;

pub use error::ApiError;
pub use routes::{build_router, ApiState};
pub use server::start_api_server;
