//! # Error Types
//!
//! Error types for the burnbox service using `thiserror`.

/// SQLSTATE `query_canceled`, raised when `statement_timeout` fires
pub const QUERY_CANCELED: &str = "57014";

/// Custom result type for burnbox operations
pub type Result<T> = std::result::Result<T, BurnboxError>;

/// Main error type for the burnbox service
#[derive(thiserror::Error, Debug)]
pub enum BurnboxError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Database and storage errors
    #[error("Database error: {context}")]
    Database {
        #[source]
        source: sqlx::Error,
        context: String,
    },

    /// A request body that is not the expected JSON document
    #[error("Serialization error: {context}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        context: String,
    },

    /// Caller supplied input that cannot be used (malformed id, bad payload)
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Resource not found errors
    #[error("Resource not found: {resource_type} with ID '{id}'")]
    NotFound {
        resource_type: String,
        id: String,
    },

    /// A storage call exceeded its deadline
    #[error("Operation timed out: {operation} after {duration_ms}ms")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// Startup handshake with the identity provider failed
    #[error("Identity provider error: {message}")]
    IdentityProvider {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Network transport errors (listener bind, serve loop)
    #[error("Transport error: {0}")]
    Transport(String),
}

impl BurnboxError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), source: None }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config { message: message.into(), source: Some(source) }
    }

    /// Wrap a sqlx error with a description of the operation that failed
    pub fn database<S: Into<String>>(source: sqlx::Error, context: S) -> Self {
        Self::Database { source, context: context.into() }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, I: Into<String>>(resource_type: R, id: I) -> Self {
        Self::NotFound { resource_type: resource_type.into(), id: id.into() }
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(operation: S, duration_ms: u64) -> Self {
        Self::Timeout { operation: operation.into(), duration_ms }
    }

    /// Create an identity provider error
    pub fn identity_provider<S: Into<String>>(message: S) -> Self {
        Self::IdentityProvider { message: message.into(), source: None }
    }

    /// Create an identity provider error caused by the HTTP client
    pub fn identity_provider_with_source<S: Into<String>>(
        message: S,
        source: reqwest::Error,
    ) -> Self {
        Self::IdentityProvider { message: message.into(), source: Some(source) }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }

    /// Wrap a JSON decode failure with a description of what was decoded
    pub fn serialization<S: Into<String>>(source: serde_json::Error, context: S) -> Self {
        Self::Serialization { source, context: context.into() }
    }

    /// Get the HTTP status code that should be returned for this error
    pub fn status_code(&self) -> u16 {
        match self {
            BurnboxError::Validation { .. } | BurnboxError::Serialization { .. } => 400,
            BurnboxError::NotFound { .. } => 404,
            BurnboxError::Timeout { .. } => 503,
            BurnboxError::Config { .. }
            | BurnboxError::Database { .. }
            | BurnboxError::IdentityProvider { .. }
            | BurnboxError::Transport(_) => 500,
        }
    }

    /// Whether PostgreSQL cancelled the statement on `statement_timeout`.
    /// The statement was rolled back, so nothing it touched changed.
    pub fn is_statement_timeout(&self) -> bool {
        match self {
            BurnboxError::Database { source, .. } => source
                .as_database_error()
                .and_then(|db| db.code())
                .is_some_and(|code| code == QUERY_CANCELED),
            _ => false,
        }
    }

    /// Whether this is an expected outcome rather than a fault
    pub fn is_not_found(&self) -> bool {
        matches!(self, BurnboxError::NotFound { .. })
    }
}

// Error conversions for common external error types
impl From<sqlx::Error> for BurnboxError {
    fn from(error: sqlx::Error) -> Self {
        Self::Database { source: error, context: "Database operation failed".to_string() }
    }
}

impl From<validator::ValidationErrors> for BurnboxError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string())
                    })
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::validation(format!("Validation failed: {}", message))
    }
}
