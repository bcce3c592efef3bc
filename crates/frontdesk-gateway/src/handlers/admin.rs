// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin panel endpoints. Mounted behind the bearer-token middleware.
//!
//! The action of a POST comes from `?action=` or, failing that, the body.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use frontdesk_chat::{AdminAction, AdminOutcome, ConversationView};
use frontdesk_core::types::ChatMessage;
use serde::{Deserialize, Serialize};

use super::{Success, success};
use crate::error::{ApiError, failed};
use crate::server::AppState;

const ACTION_FAILED: &str = "Failed to process request";

#[derive(Debug, Default, Deserialize)]
pub struct ActionQuery {
    pub action: Option<String>,
}

/// Body of a POST action. Every field is optional; an empty body is allowed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBody {
    pub action: Option<String>,
    pub message: Option<String>,
    pub admin_name: Option<String>,
    /// Conversation version the operator last saw.
    pub version: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ConversationList {
    pub conversations: Vec<ConversationView>,
}

#[derive(Debug, Serialize)]
pub struct ConversationDetail {
    pub conversation: ConversationView,
    pub messages: Vec<ChatMessage>,
}

/// GET /admin/chats
pub async fn list_chats(
    State(state): State<AppState>,
) -> Result<Json<Success<ConversationList>>, ApiError> {
    let conversations = state
        .admin
        .list()
        .await
        .map_err(failed("Failed to load chats"))?;
    Ok(success(ConversationList { conversations }))
}

/// GET /admin/chat/{id}
pub async fn get_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Success<ConversationDetail>>, ApiError> {
    let (conversation, messages) = state.admin.get(&id).await.map_err(failed(ACTION_FAILED))?;
    Ok(success(ConversationDetail {
        conversation,
        messages,
    }))
}

fn parse_body(bytes: &Bytes) -> Result<ActionBody, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ActionBody::default());
    }
    serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!(error = %e, "rejected admin action body");
        ApiError::bad_request("Invalid request body")
    })
}

/// POST /admin/chat/{id}?action=reply|takeover|release
pub async fn post_chat_action(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ActionQuery>,
    bytes: Bytes,
) -> Result<Json<Success<AdminOutcome>>, ApiError> {
    let body = parse_body(&bytes)?;
    let action = AdminAction::parse(query.action.as_deref().or(body.action.as_deref()))?;
    let admin = body.admin_name.as_deref();

    let outcome = match action {
        AdminAction::Reply => state.admin.reply(&id, body.message.as_deref(), admin).await,
        AdminAction::TakeOver => state.admin.take_over(&id, admin, body.version).await,
        AdminAction::Release => state.admin.release(&id, body.version).await,
    }
    .map_err(failed(ACTION_FAILED))?;
    Ok(success(outcome))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use axum::body::Body;
    use frontdesk_test_utils::TestHarness;
    use http::{Request, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn requires_bearer_token() {
        let (_h, app) = harness(TestHarness::builder()).await;
        let (status, body) = send(&app, get("/admin/chats")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);

        let (status, _) = send(&app, admin(get("/api/admin/chats"))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_when_no_token_configured() {
        let (_h, app) = harness(
            TestHarness::builder().with_config(|c| c.admin.bearer_token = None),
        )
        .await;
        let (status, _) = send(&app, admin(get("/admin/chats"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn takeover_silences_bot_until_release() {
        let (h, app) = harness(
            TestHarness::builder()
                .with_mock_responses(vec!["first".into(), "after release".into()]),
        )
        .await;

        let (_, body) = send(&app, post_json("/chat/message", json!({"message": "hi"}))).await;
        let id = body["conversationId"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            admin(post_json(
                &format!("/admin/chat/{id}?action=takeover"),
                json!({"adminName": "Sara"}),
            )),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["conversation"]["handoff_status"], "human");
        assert_eq!(body["conversation"]["handoff_by"], "Sara");
        let version = body["conversation"]["version"].as_i64().unwrap();

        let (_, body) = send(
            &app,
            post_json("/chat/message", json!({"message": "still there?", "conversationId": id})),
        )
        .await;
        assert!(body["response"].is_null());
        assert_eq!(body["handoff_status"], "human");
        assert_eq!(h.provider.call_count().await, 1);

        let (status, body) = send(
            &app,
            admin(post_json(
                &format!("/admin/chat/{id}"),
                json!({"action": "release", "version": version}),
            )),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["conversation"]["handoff_status"], "bot");

        let (_, body) = send(
            &app,
            post_json("/chat/message", json!({"message": "hello again", "conversationId": id})),
        )
        .await;
        assert_eq!(body["response"], "after release");
    }

    #[tokio::test]
    async fn stale_version_is_409() {
        let (_h, app) = harness(TestHarness::builder()).await;
        let (_, body) = send(
            &app,
            admin(post_json("/admin/chat/c1?action=takeover", json!({}))),
        )
        .await;
        let version = body["conversation"]["version"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            admin(post_json(
                "/admin/chat/c1?action=release",
                json!({"version": version - 1}),
            )),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);

        let (_, body) = send(&app, admin(get("/admin/chat/c1"))).await;
        assert_eq!(body["conversation"]["handoff_status"], "human");
    }

    #[tokio::test]
    async fn reply_and_detail() {
        let (_h, app) = harness(TestHarness::builder()).await;
        let (status, body) = send(
            &app,
            admin(post_json(
                "/admin/chat/c2?action=reply",
                json!({"message": "We'll call you", "adminName": "Omar"}),
            )),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"]["role"], "admin");
        assert_eq!(body["message"]["author"], "Omar");

        let (_, body) = send(&app, admin(get("/admin/chat/c2"))).await;
        assert_eq!(body["conversation"]["messageCount"], 1);
        assert_eq!(body["messages"][0]["content"], "We'll call you");
    }

    #[tokio::test]
    async fn invalid_action_is_400() {
        let (_h, app) = harness(TestHarness::builder()).await;
        let request = Request::builder()
            .method("POST")
            .uri("/admin/chat/c3?action=close")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, admin(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid action"));
    }

    #[tokio::test]
    async fn list_orders_by_recent_activity() {
        let (_h, app) = harness(TestHarness::builder()).await;
        for id in ["older", "newer"] {
            send(
                &app,
                post_json("/chat/message", json!({"message": "hi", "conversationId": id})),
            )
            .await;
        }
        let (_, body) = send(&app, admin(get("/admin/chats"))).await;
        let list = body["conversations"].as_array().unwrap();
        assert_eq!(list[0]["id"], "newer");
        assert_eq!(list[1]["id"], "older");
    }
}
