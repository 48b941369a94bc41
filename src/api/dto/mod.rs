//! Data transfer objects for the HTTP API.

pub mod secret;

pub use secret::{
    CreateSecretBody, OwnerSecretsResponse, SecretResponse, SecretSummaryResponse,
};
