//! HTTP request handlers organized by resource type

pub mod health;
pub mod secrets;
pub mod users;

pub use health::{health_handler, index_handler, HealthResponse};
pub use secrets::{consume_secret_handler, create_secret_handler};
pub use users::list_user_secrets_handler;
