//! OAuth2 client-credentials handshake with an external identity provider.
//!
//! When enabled, the service obtains one token at startup to prove that its
//! credentials work. The token itself is dropped immediately; nothing in the
//! secret lifecycle depends on it.

use std::time::Duration;

use serde::Deserialize;
use tracing::{info, instrument};

use crate::config::IdentityProviderConfig;
use crate::errors::{BurnboxError, Result};

const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// What the handshake reveals about the issued token, without the token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeOutcome {
    pub token_type: String,
    pub expires_in: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct IdentityProviderClient {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: Option<String>,
}

impl IdentityProviderClient {
    /// Build a client from validated configuration.
    ///
    /// Returns `Ok(None)` when the handshake is disabled.
    pub fn from_config(config: &IdentityProviderConfig) -> Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }

        let required = |value: &Option<String>, name: &str| {
            value.clone().ok_or_else(|| {
                BurnboxError::config(format!(
                    "{} is required when the identity provider is enabled",
                    name
                ))
            })
        };

        let client = reqwest::Client::builder()
            .timeout(HANDSHAKE_TIMEOUT)
            .build()
            .map_err(|e| {
                BurnboxError::identity_provider_with_source("Failed to build HTTP client", e)
            })?;

        Ok(Some(Self {
            client,
            token_url: required(&config.token_url, "BURNBOX_IDP_TOKEN_URL")?,
            client_id: required(&config.client_id, "BURNBOX_IDP_CLIENT_ID")?,
            client_secret: required(&config.client_secret, "BURNBOX_IDP_CLIENT_SECRET")?,
            scope: config.scope.clone(),
        }))
    }

    /// Run one client-credentials exchange
    #[instrument(skip(self), fields(token_url = %self.token_url, client_id = %self.client_id))]
    pub async fn handshake(&self) -> Result<HandshakeOutcome> {
        let mut form = vec![("grant_type", "client_credentials")];
        if let Some(scope) = &self.scope {
            form.push(("scope", scope.as_str()));
        }

        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                BurnboxError::identity_provider_with_source("Token endpoint unreachable", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BurnboxError::identity_provider(format!(
                "Token endpoint returned error status: {}",
                status
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            BurnboxError::identity_provider_with_source("Malformed token response", e)
        })?;

        if token.access_token.is_empty() {
            return Err(BurnboxError::identity_provider("Token endpoint returned an empty token"));
        }

        let outcome = HandshakeOutcome {
            token_type: token.token_type.unwrap_or_else(|| "bearer".to_string()),
            expires_in: token.expires_in.map(Duration::from_secs),
        };

        info!(
            token_type = %outcome.token_type,
            expires_in_secs = token.expires_in,
            "Identity provider handshake succeeded"
        );

        Ok(outcome)
    }
}
