// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Checkout and integration catalog endpoints.

use axum::Json;
use axum::extract::{Query, State};
use frontdesk_core::types::IntegrationApp;
use http::{HeaderMap, header::ORIGIN};
use serde::{Deserialize, Serialize};

use super::{Success, success};
use crate::error::{ApiError, JsonBody, failed};
use crate::server::{AppState, CheckoutSettings};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutBody {
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub is_yearly: Option<bool>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub session_id: String,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub from_cache: bool,
    pub apps: Vec<IntegrationApp>,
}

/// Redirect base: `frontend_url`, else the request origin, else the public URL.
fn redirect_base(settings: &CheckoutSettings, headers: &HeaderMap) -> String {
    let origin = headers
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .filter(|o| o.starts_with("http://") || o.starts_with("https://"));
    settings
        .frontend_url
        .as_deref()
        .or(origin)
        .unwrap_or(&settings.public_url)
        .trim_end_matches('/')
        .to_string()
}

/// POST /create-checkout-session
pub async fn post_checkout_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(body): JsonBody<CheckoutBody>,
) -> Result<Json<Success<CheckoutResponse>>, ApiError> {
    let request = frontdesk_stripe::checkout_request(
        &state.checkout.prices,
        body.plan_id.as_deref().unwrap_or_default(),
        body.is_yearly.unwrap_or(false),
        body.email.as_deref(),
        &redirect_base(&state.checkout, &headers),
    )?;
    let session = state
        .payments
        .create_checkout_session(request)
        .await
        .map_err(failed("Failed to create checkout session"))?;
    tracing::info!(session_id = %session.id, "checkout session created");
    Ok(success(CheckoutResponse {
        session_id: session.id,
        url: session.url,
    }))
}

/// GET /integrations-search?query=&limit=
pub async fn get_integrations(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Success<SearchResponse>>, ApiError> {
    let query = frontdesk_composio::build_query(params.query.as_deref(), params.limit.as_deref());
    let results = state
        .catalog
        .search(query)
        .await
        .map_err(failed("Failed to search integrations"))?;
    Ok(success(SearchResponse {
        from_cache: results.from_cache,
        apps: results.apps,
    }))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use frontdesk_test_utils::TestHarness;
    use http::{HeaderValue, StatusCode};
    use serde_json::json;

    fn settings(frontend: Option<&str>) -> CheckoutSettings {
        CheckoutSettings {
            prices: Default::default(),
            frontend_url: frontend.map(str::to_string),
            public_url: "https://lagentry.com".into(),
        }
    }

    #[test]
    fn redirect_base_prefers_frontend_then_origin() {
        let mut headers = HeaderMap::new();
        headers.insert(ORIGIN, HeaderValue::from_static("http://localhost:3000"));

        assert_eq!(
            redirect_base(&settings(Some("https://app.example/")), &headers),
            "https://app.example"
        );
        assert_eq!(redirect_base(&settings(None), &headers), "http://localhost:3000");
        assert_eq!(
            redirect_base(&settings(None), &HeaderMap::new()),
            "https://lagentry.com"
        );
    }

    #[tokio::test]
    async fn checkout_creates_session() {
        let (h, app) = harness(TestHarness::builder()).await;
        let mut request = post_json(
            "/create-checkout-session",
            json!({"planId": "startup-80", "isYearly": true, "email": "ada@example.com"}),
        );
        request
            .headers_mut()
            .insert(ORIGIN, HeaderValue::from_static("http://localhost:3000"));

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sessionId"], "cs_test_1");
        assert_eq!(body["url"], "https://checkout.stripe.test/cs_test_1");

        let sent = h.payments.requests().await;
        assert_eq!(sent[0].price_id, "price_startup_yearly");
        assert_eq!(sent[0].cancel_url, "http://localhost:3000/pricing");
    }

    #[tokio::test]
    async fn checkout_validates_plan() {
        let (_h, app) = harness(TestHarness::builder()).await;
        let (status, body) = send(&app, post_json("/create-checkout-session", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Plan ID is required");

        let (status, body) = send(
            &app,
            post_json("/create-checkout-session", json!({"planId": "mega"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid plan: mega");
    }

    #[tokio::test]
    async fn checkout_without_stripe_is_500() {
        let (_h, app) = harness(TestHarness::builder().with_unconfigured_payments()).await;
        let (status, body) = send(
            &app,
            post_json("/create-checkout-session", json!({"planId": "hobby-20"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Payment processing is not configured");
    }

    #[tokio::test]
    async fn integrations_search_filters() {
        let (h, app) = harness(TestHarness::builder()).await;
        let (status, body) = send(&app, get("/integrations-search?query=CRM&limit=5")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fromCache"], false);
        assert_eq!(body["apps"].as_array().unwrap().len(), 1);
        assert_eq!(body["apps"][0]["app_id"], "hubspot");

        let (_, body) = send(&app, get("/api/integrations-search")).await;
        assert_eq!(body["apps"].as_array().unwrap().len(), 3);
        assert_eq!(h.catalog.calls(), 2);
    }
}
