// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal Stripe REST client: one form-encoded POST per checkout session.

use std::time::Duration;

use frontdesk_core::FrontdeskError;
use frontdesk_core::types::{CheckoutRequest, CheckoutSession};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;
use url::form_urlencoded;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    type_: Option<String>,
}

fn payment_error<E>(message: String, err: E) -> FrontdeskError
where
    E: std::error::Error + Send + Sync + 'static,
{
    FrontdeskError::Payment {
        message,
        source: Some(Box::new(err)),
    }
}

#[derive(Debug, Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    base_url: String,
}

impl StripeClient {
    pub fn new(secret_key: &str, base_url: &str) -> Result<Self, FrontdeskError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {secret_key}"))
            .map_err(|e| FrontdeskError::Config(format!("invalid Stripe key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| payment_error(format!("failed to build HTTP client: {e}"), e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, FrontdeskError> {
        let response = self
            .client
            .post(format!("{}/checkout/sessions", self.base_url))
            .body(encode_checkout_form(request))
            .send()
            .await
            .map_err(|e| payment_error(format!("HTTP request failed: {e}"), e))?;

        let status = response.status();
        debug!(status = %status, "Stripe response received");
        let body = response
            .text()
            .await
            .map_err(|e| payment_error(format!("failed to read response body: {e}"), e))?;

        if status.is_success() {
            return serde_json::from_str(&body)
                .map_err(|e| payment_error(format!("failed to parse Stripe response: {e}"), e));
        }

        let detail = serde_json::from_str::<StripeErrorResponse>(&body)
            .ok()
            .and_then(|r| {
                let kind = r.error.type_.unwrap_or_else(|| "api_error".into());
                r.error.message.map(|m| format!("{kind}: {m}"))
            })
            .unwrap_or(body);
        Err(FrontdeskError::Payment {
            message: format!("Stripe API error ({status}): {detail}"),
            source: None,
        })
    }
}

/// Form body in Stripe's bracketed-key encoding.
pub fn encode_checkout_form(request: &CheckoutRequest) -> String {
    let mut form = form_urlencoded::Serializer::new(String::new());
    form.append_pair("mode", "subscription")
        .append_pair("payment_method_types[0]", "card")
        .append_pair("line_items[0][price]", &request.price_id)
        .append_pair("line_items[0][quantity]", "1")
        .append_pair("success_url", &request.success_url)
        .append_pair("cancel_url", &request.cancel_url)
        .append_pair("metadata[planId]", &request.plan_id)
        .append_pair(
            "metadata[isYearly]",
            if request.is_yearly { "true" } else { "false" },
        );
    if let Some(email) = request.customer_email.as_deref() {
        form.append_pair("customer_email", email);
    }
    form.finish()
}
