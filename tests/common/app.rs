//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use inkblot::models::config::FormatEntry;
use inkblot::models::AppConfig;
use inkblot::server::{build_router, create_app_state, AppState};

/// A small render configuration so API tests stay fast; the full 1200px
/// master is exercised by the determinism suite, not by every request test.
pub fn test_config() -> AppConfig {
    AppConfig {
        master_size: 64,
        formats: vec![
            FormatEntry {
                name: "landscape".to_string(),
                width: 64,
                height: 33,
            },
            FormatEntry {
                name: "square".to_string(),
                width: 64,
                height: 64,
            },
        ],
        ..AppConfig::default()
    }
}

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with the fast test configuration
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = create_app_state(Arc::new(config));

        // Build router using shared server module (same as production)
        let router = build_router(state.clone());

        Self { router, state }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with a JSON body
    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> TestResponse {
        self.request(
            Request::post(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request should not fail at the transport level");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("body should collect")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Captured response for assertions
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("body should be valid JSON")
    }
}
