//! Request and response bodies for the secret endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{OwnerSecrets, Secret, SecretSummary};

/// Body of `POST /secret`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateSecretBody {
    /// Text to store; returned once, then deleted
    #[schema(example = "the eagle has landed")]
    pub message: String,

    /// Optional owner, enables listing via `GET /user/{id}`
    #[serde(default)]
    #[schema(example = 7)]
    pub user_id: Option<i32>,
}

/// A stored secret as returned on create and on consume
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct SecretResponse {
    pub id: Uuid,
    pub message: String,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Secret> for SecretResponse {
    fn from(secret: Secret) -> Self {
        Self {
            id: secret.id.into_inner(),
            message: secret.message,
            user_id: secret.user_id.map(|u| u.into_inner()),
            created_at: secret.created_at,
        }
    }
}

/// Listing entry; the message is deliberately absent
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct SecretSummaryResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<SecretSummary> for SecretSummaryResponse {
    fn from(summary: SecretSummary) -> Self {
        Self { id: summary.id.into_inner(), created_at: summary.created_at }
    }
}

/// Body of `GET /user/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct OwnerSecretsResponse {
    pub user_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub secrets: Vec<SecretSummaryResponse>,
}

impl From<OwnerSecrets> for OwnerSecretsResponse {
    fn from(listing: OwnerSecrets) -> Self {
        Self {
            user_id: listing.user_id.into_inner(),
            username: listing.username,
            secrets: listing.secrets.into_iter().map(SecretSummaryResponse::from).collect(),
        }
    }
}
