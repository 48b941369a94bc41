//! Owner listing endpoint.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

use crate::api::{dto::OwnerSecretsResponse, error::{ApiError, ErrorBody}, routes::ApiState};

#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = String, Path, description = "Owner id (32-bit integer)")),
    responses(
        (
            status = 200,
            description = "Pending secrets of the owner, oldest first",
            body = OwnerSecretsResponse
        ),
        (status = 400, description = "Owner id is not an integer", body = ErrorBody),
        (status = 404, description = "Owner has no pending secrets", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tag = "users"
)]
#[instrument(skip(state))]
pub async fn list_user_secrets_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<OwnerSecretsResponse>, ApiError> {
    let listing = state.secret_service.list_by_owner(&id).await?;
    Ok(Json(listing.into()))
}
