//! Repository implementations backed by PostgreSQL.

pub mod secret;
pub mod user;

pub use secret::{SecretStore, SqlxSecretRepository};
pub use user::{SqlxUserRepository, UserDirectory};
