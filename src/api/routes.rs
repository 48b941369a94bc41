use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::timeout::TimeoutLayer;

use crate::observability::trace_http_requests;
use crate::services::SecretService;

use super::{
    docs,
    handlers::{
        consume_secret_handler, create_secret_handler, health_handler, index_handler,
        list_user_secrets_handler,
    },
};

/// Shared handler state
#[derive(Clone)]
pub struct ApiState {
    pub secret_service: SecretService,
}

impl ApiState {
    pub fn new(secret_service: SecretService) -> Self {
        Self { secret_service }
    }
}

/// Assemble the public router.
///
/// `request_timeout` bounds every request end to end; storage calls carry
/// their own tighter deadline inside [`SecretService`].
pub fn build_router(state: ApiState, request_timeout: Duration) -> Router {
    let api = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/secret", post(create_secret_handler))
        .route("/secret/{id}", get(consume_secret_handler))
        .route("/user/{id}", get(list_user_secrets_handler))
        .with_state(state);

    api.merge(docs::docs_router())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(trace_http_requests))
}
