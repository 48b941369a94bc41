//! # HTTP Request Tracing Middleware
//!
//! Axum middleware that wraps every request in an `http_request` span, logs
//! its completion and records request metrics.

use axum::{extract::Request, middleware::Next, response::Response};
use metrics::{counter, histogram};
use std::time::Instant;
use tracing::Instrument;

use super::metrics::{HTTP_REQUESTS, HTTP_REQUEST_DURATION};

/// Request logging and metrics middleware, installed with
/// `axum::middleware::from_fn(trace_http_requests)`.
pub async fn trace_http_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let span = crate::request_span!(method, path);
    let response = next.run(request).instrument(span.clone()).await;

    let status_code = response.status().as_u16();
    let elapsed = start.elapsed();
    span.record("status", status_code);

    let elapsed_ms = elapsed.as_millis() as u64;
    span.in_scope(|| {
        if status_code >= 500 {
            tracing::warn!(status = status_code, elapsed_ms, "request failed");
        } else {
            tracing::info!(status = status_code, elapsed_ms, "request completed");
        }
    });

    let path_label = normalize_path_for_metrics(&path);

    counter!(
        HTTP_REQUESTS,
        "method" => method.clone(),
        "path" => path_label.clone(),
        "status" => status_code.to_string()
    )
    .increment(1);

    histogram!(
        HTTP_REQUEST_DURATION,
        "method" => method,
        "path" => path_label
    )
    .record(elapsed.as_secs_f64());

    response
}

/// Replace the id segment of resource paths with a placeholder so every
/// secret handle does not become its own time series.
fn normalize_path_for_metrics(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();

    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let prev_is_collection =
                i > 0 && matches!(segments.get(i - 1).copied(), Some("secret") | Some("user"));
            if prev_is_collection && !segment.is_empty() {
                ":id"
            } else {
                *segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::get, Router};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn ok_handler() -> &'static str {
        "OK"
    }

    async fn failing_handler() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    #[tokio::test]
    async fn test_middleware_passes_response_through() {
        let app = Router::new()
            .route("/test", get(ok_handler))
            .route("/boom", get(failing_handler))
            .layer(axum::middleware::from_fn(trace_http_requests));

        let request = Request::builder().uri("/test").method("GET").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::builder().uri("/boom").method("GET").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_normalize_path_for_metrics() {
        assert_eq!(normalize_path_for_metrics("/"), "/");
        assert_eq!(normalize_path_for_metrics("/secret"), "/secret");
        assert_eq!(normalize_path_for_metrics("/health"), "/health");
        assert_eq!(
            normalize_path_for_metrics("/secret/550e8400-e29b-41d4-a716-446655440000"),
            "/secret/:id"
        );
        assert_eq!(normalize_path_for_metrics("/secret/not-a-uuid"), "/secret/:id");
        assert_eq!(normalize_path_for_metrics("/user/42"), "/user/:id");
    }
}
