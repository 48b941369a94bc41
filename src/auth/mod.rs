//! Authentication module entry point.
//!
//! Burnbox does not authenticate callers. This module only holds the optional
//! startup handshake with an OAuth2 identity provider.

pub mod identity_provider;

pub use identity_provider::{HandshakeOutcome, IdentityProviderClient};
