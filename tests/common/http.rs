//! HTTP testing utilities
use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt; // for `oneshot`
use tracegas::controller::Dashboard;
use tracegas::http::server::create_router;
use tracegas::http::state::HttpServerState;
use tracegas::importers::create_measurement_source;

use super::TestData;

/// HTTP test client for making requests to our app
pub struct TestApp {
    app: axum::Router,
}

impl TestApp {
    /// Create a test app serving the files of the test data directory
    pub async fn new(data: &TestData) -> Result<Self> {
        Self::with_cache(data, 0).await
    }

    pub async fn with_cache(data: &TestData, cache_size: usize) -> Result<Self> {
        let catalog = Arc::new(data.catalog()?);
        let source = create_measurement_source(cache_size);
        let mut dashboard = Dashboard::new(catalog.clone(), source.clone())?;
        dashboard.initialize().await;

        let state = HttpServerState {
            title: Arc::new("Trace gas test".to_string()),
            catalog,
            source,
            dashboard: Arc::new(Mutex::new(dashboard)),
        };

        Ok(Self {
            app: create_router(state, 64 * 1024),
        })
    }

    /// Send a GET request
    pub async fn get(&self, path: &str) -> Result<TestResponse> {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())?;

        let response = self.app.clone().oneshot(request).await?;
        Ok(TestResponse::new(response).await)
    }

    /// Send a POST request with JSON data
    pub async fn post_json(&self, path: &str, json_data: &str) -> Result<TestResponse> {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(json_data.to_string()))?;

        let response = self.app.clone().oneshot(request).await?;
        Ok(TestResponse::new(response).await)
    }

    /// Send a control event to the dashboard
    pub async fn send_event(
        &self,
        control: &str,
        value: serde_json::Value,
    ) -> Result<TestResponse> {
        let body = serde_json::json!({ "control": control, "value": value });
        self.post_json("/api/v1/dashboard/events", &body.to_string())
            .await
    }
}

/// Test response wrapper for easier assertions
pub struct TestResponse {
    status: StatusCode,
    body: String,
}

impl TestResponse {
    async fn new(response: axum::response::Response) -> Self {
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default()
            .to_vec();
        let body = String::from_utf8_lossy(&body_bytes).to_string();

        Self { status, body }
    }

    /// Get response status
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get response body as string
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parse response body as JSON
    pub fn json<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    /// Assert response status
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "Expected status {}, got {}. Body: {}",
            expected, self.status, self.body
        );
        self
    }
}
