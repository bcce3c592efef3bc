// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Visitor chat endpoints.

use axum::Json;
use axum::extract::{Path, State};
use frontdesk_chat::ChatReply;
use frontdesk_core::types::ChatMessage;
use serde::{Deserialize, Serialize};

use super::{Success, success};
use crate::error::{ApiError, JsonBody, failed};
use crate::server::AppState;

const CHAT_FAILED: &str = "I apologize, but I encountered an error processing your request. Please try again in a moment.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<ChatMessage>,
}

/// POST /chat/message
pub async fn post_message(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<MessageRequest>,
) -> Result<Json<Success<ChatReply>>, ApiError> {
    let reply = state
        .chat
        .handle_message(
            body.message.as_deref().unwrap_or_default(),
            body.conversation_id.as_deref(),
        )
        .await
        .map_err(failed(CHAT_FAILED))?;
    Ok(success(reply))
}

/// GET /chat/conversation/{id}
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Success<MessagesResponse>>, ApiError> {
    let messages = state
        .chat
        .conversation_messages(&id)
        .await
        .map_err(failed("Failed to load conversation"))?;
    Ok(success(MessagesResponse { messages }))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use frontdesk_test_utils::{MockReply, TestHarness};
    use http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn message_round_trip() {
        let (h, app) = harness(
            TestHarness::builder().with_mock_responses(vec!["Hello from the bot".into()]),
        )
        .await;

        let (status, body) =
            send(&app, post_json("/api/chat/message", json!({"message": "hi"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["response"], "Hello from the bot");
        assert_eq!(body["handoff_status"], "bot");
        let id = body["conversationId"].as_str().unwrap().to_string();

        let (status, body) = send(&app, get(&format!("/chat/conversation/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(h.provider.call_count().await, 1);
    }

    #[tokio::test]
    async fn blank_message_is_400() {
        let (_h, app) = harness(TestHarness::builder()).await;
        let (status, body) =
            send(&app, post_json("/chat/message", json!({"message": "   "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"success": false, "error": "Message is required"}));
    }

    #[tokio::test]
    async fn malformed_body_is_400() {
        let (_h, app) = harness(TestHarness::builder()).await;
        let (status, body) = send(&app, post_json("/chat/message", json!("just a string"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn quota_error_returns_fallback() {
        let (_h, app) = harness(TestHarness::builder().with_replies(vec![MockReply::Quota])).await;
        let (status, body) =
            send(&app, post_json("/chat/message", json!({"message": "pricing?"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["response"].as_str().unwrap().contains("high demand"));
    }

    #[tokio::test]
    async fn unknown_conversation_has_no_messages() {
        let (_h, app) = harness(TestHarness::builder()).await;
        let (status, body) = send(&app, get("/chat/conversation/nope")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["messages"], json!([]));
    }
}
