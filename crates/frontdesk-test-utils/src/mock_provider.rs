// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with a queue of scripted
//! replies, including the failure kinds the chat handler distinguishes.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use frontdesk_core::FrontdeskError;
use frontdesk_core::traits::{PluginAdapter, ProviderAdapter};
use frontdesk_core::types::{
    AdapterType, CompletionRequest, CompletionResponse, HealthStatus, TokenUsage,
};

/// One scripted outcome of a `complete` call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    /// Fails with `QuotaExceeded`.
    Quota,
    /// Fails with `NotConfigured`.
    NotConfigured,
    /// Fails with a generic provider error.
    Failure(String),
}

impl MockReply {
    fn into_result(self) -> Result<String, FrontdeskError> {
        match self {
            MockReply::Text(text) => Ok(text),
            MockReply::Quota => Err(FrontdeskError::QuotaExceeded {
                message: "You exceeded your current quota".into(),
            }),
            MockReply::NotConfigured => Err(FrontdeskError::NotConfigured("OpenAI API key".into())),
            MockReply::Failure(message) => Err(FrontdeskError::Provider {
                message,
                source: None,
            }),
        }
    }
}

/// A mock provider that pops scripted replies in FIFO order.
///
/// When the queue is empty, "mock response" is returned. Every request is
/// recorded for later inspection.
pub struct MockProvider {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::with_replies(Vec::new())
    }

    /// Pre-loads successful text replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self::with_replies(responses.into_iter().map(MockReply::Text).collect())
    }

    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from(replies)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub async fn push(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, FrontdeskError> {
        self.requests.lock().await.push(request);
        let reply = self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::Text("mock response".to_string()));
        let content = reply.into_result()?;
        Ok(CompletionResponse {
            id: format!("mock-resp-{}", uuid::Uuid::new_v4()),
            content,
            model: "mock-model".to_string(),
            finish_reason: Some("stop".to_string()),
            usage: TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 20,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk_core::types::{PromptMessage, PromptRole};

    fn request() -> CompletionRequest {
        CompletionRequest {
            messages: vec![PromptMessage::new(PromptRole::User, "hi")],
        }
    }

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new();
        let resp = provider.complete(request()).await.unwrap();
        assert_eq!(resp.content, "mock response");
        assert_eq!(provider.call_count().await, 1);
    }

    #[tokio::test]
    async fn scripted_replies_in_order() {
        let provider = MockProvider::with_replies(vec![
            MockReply::Text("first".into()),
            MockReply::Quota,
        ]);
        assert_eq!(provider.complete(request()).await.unwrap().content, "first");
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, FrontdeskError::QuotaExceeded { .. }));
        assert_eq!(provider.requests().await.len(), 2);
    }
}
