//! Domain layer
//!
//! Plain entities of the secret lifecycle with no HTTP or database concerns
//! beyond the id types being bindable as query parameters.
//!
//! ## Module Organization
//!
//! - `id`: Type-safe domain identifiers with NewType pattern
//! - `secret`: Secrets, their listing summaries and owners

pub mod id;
pub mod secret;

pub use id::{SecretId, UserId};
pub use secret::{OwnerSecrets, Secret, SecretSummary, User};
