// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the chat completions API.
//!
//! One attempt per request. Quota and billing refusals are reported as
//! [`FrontdeskError::QuotaExceeded`] so the chat handler can answer with the
//! matching fallback.

use std::time::Duration;

use frontdesk_core::FrontdeskError;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a client authenticated with `api_key` against `base_url`
    /// (e.g. `https://api.openai.com/v1`).
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, FrontdeskError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| FrontdeskError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FrontdeskError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Sends a completion request and returns the parsed response.
    pub async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, FrontdeskError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| FrontdeskError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "completion response received");

        let body = response.text().await.map_err(|e| FrontdeskError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| FrontdeskError::Provider {
                message: format!("failed to parse API response: {e}"),
                source: Some(Box::new(e)),
            });
        }

        Err(classify_error(status, &body))
    }
}

/// Maps a non-2xx response to the matching error variant.
pub fn classify_error(status: StatusCode, body: &str) -> FrontdeskError {
    let parsed = serde_json::from_str::<ApiErrorResponse>(body).ok();
    let message = parsed
        .as_ref()
        .map(|p| p.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("API returned {status}: {body}"));
    let code = parsed.as_ref().and_then(|p| p.error.code.as_deref());

    let lowered = message.to_lowercase();
    if status == StatusCode::TOO_MANY_REQUESTS
        || code == Some("insufficient_quota")
        || lowered.contains("quota")
        || lowered.contains("billing")
    {
        return FrontdeskError::QuotaExceeded { message };
    }

    FrontdeskError::Provider {
        message: format!("OpenAI API error ({status}): {message}"),
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApiMessage;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::new("sk-test", base_url, Duration::from_secs(5)).unwrap()
    }

    fn test_request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ApiMessage {
                role: "user".into(),
                content: "Hello".into(),
            }],
            temperature: 0.7,
            max_tokens: 500,
        }
    }

    fn success_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
        })
    }

    #[tokio::test]
    async fn complete_success_sends_auth_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({"model": "gpt-4o-mini", "max_tokens": 500})))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Hi!")))
            .expect(1)
            .mount(&server)
            .await;

        let result = test_client(&server.uri())
            .complete(&test_request())
            .await
            .unwrap();
        assert_eq!(result.id, "chatcmpl-1");
        assert_eq!(result.choices[0].message.content.as_deref(), Some("Hi!"));
        assert_eq!(result.usage.unwrap().prompt_tokens, 12);
    }

    #[tokio::test]
    async fn rate_limit_is_quota_and_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"message": "Rate limit reached", "type": "requests"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .complete(&test_request())
            .await
            .unwrap_err();
        assert!(matches!(err, FrontdeskError::QuotaExceeded { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn server_error_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .complete(&test_request())
            .await
            .unwrap_err();
        assert!(matches!(err, FrontdeskError::Provider { .. }));
        assert!(err.to_string().contains("upstream exploded"));
    }

    #[test]
    fn insufficient_quota_code_is_quota() {
        let body = r#"{"error":{"message":"You exceeded your current plan","code":"insufficient_quota"}}"#;
        assert!(matches!(
            classify_error(StatusCode::FORBIDDEN, body),
            FrontdeskError::QuotaExceeded { .. }
        ));
    }

    #[test]
    fn billing_message_is_quota() {
        let body = r#"{"error":{"message":"Billing hard limit has been reached"}}"#;
        assert!(matches!(
            classify_error(StatusCode::BAD_REQUEST, body),
            FrontdeskError::QuotaExceeded { .. }
        ));
    }

    #[test]
    fn auth_failure_is_provider_error() {
        let body = r#"{"error":{"message":"Incorrect API key provided","code":"invalid_api_key"}}"#;
        assert!(matches!(
            classify_error(StatusCode::UNAUTHORIZED, body),
            FrontdeskError::Provider { .. }
        ));
    }
}
