//! Secret lifecycle entities.
//!
//! A secret exists in exactly one of two states. While its row is present it is
//! pending; once consumed the row is gone and the handle never resolves again.
//! There are no tombstones, so "consumed" and "never existed" look the same.

use chrono::{DateTime, Utc};

use super::id::{SecretId, UserId};

/// A stored, not yet consumed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    pub id: SecretId,
    pub message: String,
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Secret {
    /// Listing view of this secret; never carries the body.
    pub fn summary(&self) -> SecretSummary {
        SecretSummary { id: self.id, created_at: self.created_at }
    }
}

/// What an owner listing exposes about one pending secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretSummary {
    pub id: SecretId,
    pub created_at: DateTime<Utc>,
}

/// A registered user that can own secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

/// Pending secrets of one owner, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSecrets {
    pub user_id: UserId,
    /// `None` when the owner id has no `users` row
    pub username: Option<String>,
    pub secrets: Vec<SecretSummary>,
}
