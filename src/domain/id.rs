//! Domain ID Types with NewType Pattern
//!
//! Type-safe wrappers for the two identifiers the service deals in. A secret
//! handle is a UUID issued by PostgreSQL; an owner is an integer user id.
//! Mixing them up is a compile error.

use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::{Decode, Encode, Postgres, Type};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Generates a transparent id wrapper over `$inner`, parseable from path
/// segments and bindable as a PostgreSQL parameter.
macro_rules! domain_id {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Wrap an existing raw value
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Get the inner value
            pub const fn into_inner(self) -> $inner {
                self.0
            }

            /// Parse from the textual form used in URLs
            pub fn parse(s: &str) -> Result<Self, <$inner as FromStr>::Err> {
                s.parse::<$inner>().map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = <$inner as FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl Type<Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <$inner as Type<Postgres>>::type_info()
            }
        }

        impl<'q> Encode<'q, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
                <$inner as Encode<'q, Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
                <$inner as Decode<'r, Postgres>>::decode(value).map(Self)
            }
        }
    };
}

domain_id!(
    /// Opaque handle of a stored secret
    SecretId(Uuid)
);

domain_id!(
    /// Identifier of the user that owns a secret
    UserId(i32)
);

impl SecretId {
    /// Borrow the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}
