use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::Error;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::NotFound(_) => "not_found",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "not_found")]
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let error = self.kind();
        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::Internal(msg) => msg,
        };

        (status, Json(ErrorBody { error, message })).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation { message, .. } => ApiError::BadRequest(message),
            Error::Serialization { ref source, ref context } => {
                ApiError::BadRequest(format!("{}: {}", context, source))
            }
            Error::NotFound { .. } => {
                tracing::debug!(error = %err, "Resource not found");
                ApiError::NotFound(err.to_string())
            }
            Error::Timeout { .. } => {
                tracing::warn!(error = %err, "Request abandoned after storage deadline");
                ApiError::ServiceUnavailable(err.to_string())
            }
            Error::Database { ref source, .. } => {
                tracing::error!(error = %err, source = %source, "Storage failure");
                ApiError::Internal(err.to_string())
            }
            Error::Config { .. } | Error::IdentityProvider { .. } | Error::Transport(_) => {
                tracing::error!(error = %err, "Internal failure");
                ApiError::Internal(err.to_string())
            }
        }
    }
}
