// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers, grouped by area.

pub mod admin;
pub mod chat;
pub mod commerce;
pub mod leads;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::server::AppState;

/// Successful response body: `{"success": true, ...data}`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

pub fn success<T: Serialize>(data: T) -> Json<Success<T>> {
    Json(Success {
        success: true,
        data,
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /health
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use frontdesk_test_utils::{TestHarness, TestHarnessBuilder};
    use http::{Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::server::{Adapters, AppState, router};

    pub const ADMIN_TOKEN: &str = "test-admin-token";

    pub fn app(h: &TestHarness) -> Router {
        let adapters = Adapters {
            storage: h.storage.clone(),
            provider: h.provider.clone(),
            mailer: h.mailer.clone(),
            payments: h.payments.clone(),
            catalog: h.catalog.clone(),
        };
        let state = AppState::new(&h.config, "You are a test assistant.".into(), adapters);
        router(state, &h.config.server)
    }

    pub async fn harness(builder: TestHarnessBuilder) -> (TestHarness, Router) {
        let h = builder.build().await.unwrap();
        let app = app(&h);
        (h, app)
    }

    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(request).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn admin(mut request: Request<Body>) -> Request<Body> {
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {ADMIN_TOKEN}").parse().unwrap(),
        );
        request
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use frontdesk_test_utils::TestHarness;
    use http::StatusCode;

    #[tokio::test]
    async fn health_reports_version() {
        let (_h, app) = harness(TestHarness::builder()).await;
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body["uptime_secs"].is_u64());
    }

    #[tokio::test]
    async fn routes_are_mounted_under_api() {
        let (_h, app) = harness(TestHarness::builder()).await;
        let (status, body) = send(&app, get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn wrong_method_is_405() {
        let (_h, app) = harness(TestHarness::builder()).await;
        let (status, _) = send(&app, get("/waitlist")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
