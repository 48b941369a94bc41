use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::{
    CreateSecretBody, OwnerSecretsResponse, SecretResponse, SecretSummaryResponse,
};
use crate::api::error::ErrorBody;
use crate::api::handlers::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::index_handler,
        crate::api::handlers::health::health_handler,
        crate::api::handlers::secrets::create_secret_handler,
        crate::api::handlers::secrets::consume_secret_handler,
        crate::api::handlers::users::list_user_secrets_handler,
    ),
    components(
        schemas(
            CreateSecretBody,
            SecretResponse,
            SecretSummaryResponse,
            OwnerSecretsResponse,
            ErrorBody,
            HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "secrets", description = "Store a secret and read it exactly once"),
        (name = "users", description = "Pending secrets per owner")
    ),
    info(
        title = "burnbox",
        description = "Burn-after-reading secret sharing"
    )
)]
pub struct ApiDoc;

pub fn docs_router() -> Router {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()).into()
}
