//! Test helpers for exercising the router against in-memory storage.
//!
//! Handler tests go through [`axum_test::TestServer`] so extractor
//! rejections, status mapping and middleware all run as in production.
//! Tests that need a real database live under `tests/` behind the
//! `postgres_tests` feature.

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;

use crate::api::routes::{build_router, ApiState};
use crate::services::SecretService;
use crate::storage::mock::{MockSecretStore, MockUserDirectory};

/// Owner id known to the mock user directory in handler tests
pub const TEST_USER_ID: i32 = 7;
pub const TEST_USERNAME: &str = "alice";

/// Build handler state on top of the given mock store.
pub fn mock_state(store: Arc<MockSecretStore>, storage_timeout: Option<Duration>) -> ApiState {
    let users = Arc::new(MockUserDirectory::new().with_user(TEST_USER_ID, TEST_USERNAME));
    let service = SecretService::new(store, users).with_storage_timeout(storage_timeout);
    ApiState::new(service)
}

/// Test server with no storage deadline. The returned store lets tests
/// inject failures and count calls.
pub fn test_server() -> (TestServer, Arc<MockSecretStore>) {
    test_server_with_timeout(None)
}

pub fn test_server_with_timeout(
    storage_timeout: Option<Duration>,
) -> (TestServer, Arc<MockSecretStore>) {
    let store = Arc::new(MockSecretStore::new());
    let router = build_router(mock_state(store.clone(), storage_timeout), Duration::from_secs(30));
    let server = TestServer::new(router).expect("test server");
    (server, store)
}
