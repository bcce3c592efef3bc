// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat-completions provider for the Frontdesk chat assistant.
//!
//! Implements [`ProviderAdapter`] over an OpenAI-compatible
//! `/chat/completions` endpoint. Without an API key the provider still
//! constructs, and every call fails with [`FrontdeskError::NotConfigured`].

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use frontdesk_config::model::OpenAiConfig;
use frontdesk_core::error::FrontdeskError;
use frontdesk_core::traits::{PluginAdapter, ProviderAdapter};
use frontdesk_core::types::{
    AdapterType, CompletionRequest, CompletionResponse, HealthStatus, TokenUsage,
};
use tracing::{debug, info, warn};

use crate::client::OpenAiClient;
use crate::types::{ApiMessage, ChatCompletionRequest};

pub struct OpenAiProvider {
    client: Option<OpenAiClient>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(config: &OpenAiConfig) -> Result<Self, FrontdeskError> {
        let client = match config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            Some(key) => Some(OpenAiClient::new(
                key,
                &config.base_url,
                Duration::from_secs(config.timeout_secs),
            )?),
            None => {
                warn!("openai.api_key is not set; chat replies will use the fallback text");
                None
            }
        };

        info!(model = %config.model, configured = client.is_some(), "OpenAI provider initialized");

        Ok(Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Whether an API key was supplied.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn to_api_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|m| ApiMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        // No API call here; health checks must not spend tokens.
        Ok(if self.is_configured() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded("API key not configured".into())
        })
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        debug!("OpenAI provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, FrontdeskError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| FrontdeskError::NotConfigured("OpenAI API key".into()))?;

        let api_request = self.to_api_request(&request);
        debug!(messages = api_request.messages.len(), "sending completion request");
        let response = client.complete(&api_request).await?;

        let choice = response.choices.into_iter().next();
        let finish_reason = choice.as_ref().and_then(|c| c.finish_reason.clone());
        let content = choice
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| FrontdeskError::Provider {
                message: "completion response contained no text".into(),
                source: None,
            })?;

        let usage = response.usage.unwrap_or_default();
        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
            finish_reason,
            usage: TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk_core::types::{PromptMessage, PromptRole};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str, api_key: Option<&str>) -> OpenAiConfig {
        OpenAiConfig {
            api_key: api_key.map(str::to_string),
            base_url: base_url.to_string(),
            ..OpenAiConfig::default()
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            messages: vec![
                PromptMessage::new(PromptRole::System, "You are helpful."),
                PromptMessage::new(PromptRole::User, "What do you cost?"),
            ],
        }
    }

    #[tokio::test]
    async fn missing_key_reports_not_configured() {
        let provider = OpenAiProvider::new(&config("http://127.0.0.1:9", None)).unwrap();
        assert!(!provider.is_configured());
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, FrontdeskError::NotConfigured(_)));
        assert!(matches!(
            provider.health_check().await.unwrap(),
            HealthStatus::Degraded(_)
        ));
    }

    #[tokio::test]
    async fn maps_prompt_and_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "You are helpful."},
                    {"role": "user", "content": "What do you cost?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-9",
                "model": "gpt-4o-mini",
                "choices": [{"message": {"content": "  From $20/month.  "}, "finish_reason": "stop"}],
                "usage": {"prompt_tokens": 20, "completion_tokens": 5}
            })))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(&config(&server.uri(), Some("sk-test"))).unwrap();
        let response = provider.complete(request()).await.unwrap();
        assert_eq!(response.content, "From $20/month.");
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.completion_tokens, 5);
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-0",
                "model": "gpt-4o-mini",
                "choices": []
            })))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(&config(&server.uri(), Some("sk-test"))).unwrap();
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, FrontdeskError::Provider { .. }));
    }
}
