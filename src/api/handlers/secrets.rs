//! Create and burn-on-read endpoints.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use crate::api::{
    dto::{CreateSecretBody, SecretResponse},
    error::{ApiError, ErrorBody},
    routes::ApiState,
};
use crate::domain::UserId;
use crate::errors::Error;

/// The body is decoded as JSON whatever `Content-Type` the client sends.
#[utoipa::path(
    post,
    path = "/secret",
    request_body(content = CreateSecretBody, content_type = "application/json"),
    responses(
        (status = 201, description = "Secret stored", body = SecretResponse),
        (status = 400, description = "Body is not a valid secret", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
        (status = 503, description = "Storage deadline exceeded", body = ErrorBody)
    ),
    tag = "secrets"
)]
#[instrument(skip(state, payload))]
pub async fn create_secret_handler(
    State(state): State<ApiState>,
    payload: Bytes,
) -> Result<(StatusCode, Json<SecretResponse>), ApiError> {
    let body: CreateSecretBody = serde_json::from_slice(&payload)
        .map_err(|e| Error::serialization(e, "Invalid secret payload"))?;

    let created =
        state.secret_service.create(body.message, body.user_id.map(UserId::new)).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get,
    path = "/secret/{id}",
    params(("id" = String, Path, description = "Secret handle (UUID)")),
    responses(
        (status = 200, description = "Secret returned and deleted", body = SecretResponse),
        (status = 400, description = "Handle is not a UUID", body = ErrorBody),
        (status = 404, description = "Secret already read or never existed", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
        (status = 503, description = "Storage deadline exceeded", body = ErrorBody)
    ),
    tag = "secrets"
)]
#[instrument(skip(state))]
pub async fn consume_secret_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<SecretResponse>, ApiError> {
    let secret = state.secret_service.consume(&id).await?;
    Ok(Json(secret.into()))
}
