// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator actions from the admin panel.
//!
//! The panel polls [`AdminService::list`] and [`AdminService::get`]; every
//! mutation is an independent call. Takeover and release accept the
//! conversation `version` the operator last saw and fail with
//! [`FrontdeskError::Conflict`] when it is stale.

use std::sync::Arc;

use frontdesk_core::error::FrontdeskError;
use frontdesk_core::traits::StorageAdapter;
use frontdesk_core::types::{
    ChatMessage, Conversation, ConversationStatus, ConversationSummary, HandoffStatus, Role,
};
use serde::Serialize;
use strum::EnumString;
use tracing::info;

use crate::attention::AttentionPolicy;

/// Most conversations returned by one list call.
pub const LIST_LIMIT: usize = 100;

const DEFAULT_ADMIN_NAME: &str = "Admin";
const RELEASE_NOTICE: &str = "Conversation has been released back to the bot.";

/// A POST action on one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum AdminAction {
    Reply,
    TakeOver,
    Release,
}

impl AdminAction {
    pub fn parse(raw: Option<&str>) -> Result<Self, FrontdeskError> {
        raw.map(str::trim)
            .and_then(|a| a.parse().ok())
            .ok_or_else(|| {
                FrontdeskError::Validation(
                    "Invalid action. Use ?action=reply, ?action=takeover, or ?action=release"
                        .into(),
                )
            })
    }
}

/// Conversation header as the admin panel renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationView {
    pub id: String,
    pub status: ConversationStatus,
    pub created_at: String,
    pub updated_at: String,
    #[serde(rename = "messageCount", skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u64>,
    pub handoff_status: HandoffStatus,
    pub handoff_at: Option<String>,
    pub handoff_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_attention: Option<bool>,
    pub version: i64,
}

impl From<Conversation> for ConversationView {
    fn from(c: Conversation) -> Self {
        Self {
            id: c.id,
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
            message_count: None,
            handoff_status: c.handoff_status,
            handoff_at: c.handoff_at,
            handoff_by: c.handoff_by,
            needs_attention: None,
            version: c.version,
        }
    }
}

/// Result of a mutating admin action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminOutcome {
    pub conversation: ConversationView,
    /// The message the action appended (reply or handoff notice).
    pub message: ChatMessage,
}

fn admin_name(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_ADMIN_NAME)
        .to_string()
}

pub struct AdminService {
    storage: Arc<dyn StorageAdapter>,
    attention: AttentionPolicy,
}

impl AdminService {
    pub fn new(storage: Arc<dyn StorageAdapter>, attention: AttentionPolicy) -> Self {
        Self { storage, attention }
    }

    /// Up to [`LIST_LIMIT`] conversations, most recently updated first.
    pub async fn list(&self) -> Result<Vec<ConversationView>, FrontdeskError> {
        let summaries = self
            .storage
            .list_conversations(LIST_LIMIT, self.attention.window())
            .await?;
        Ok(summaries
            .into_iter()
            .map(|summary| self.summary_view(summary))
            .collect())
    }

    fn summary_view(&self, summary: ConversationSummary) -> ConversationView {
        let needs_attention = self.attention.needs_attention(&summary.recent_user_messages);
        ConversationView {
            message_count: Some(summary.message_count),
            needs_attention: Some(needs_attention),
            ..ConversationView::from(summary.conversation)
        }
    }

    /// Conversation header and every message. Unknown ids are created.
    pub async fn get(
        &self,
        conversation_id: &str,
    ) -> Result<(ConversationView, Vec<ChatMessage>), FrontdeskError> {
        let conversation = self.storage.get_or_create_conversation(conversation_id).await?;
        let messages = self.storage.get_messages(conversation_id, None).await?;
        let view = ConversationView {
            message_count: Some(messages.len() as u64),
            ..ConversationView::from(conversation)
        };
        Ok((view, messages))
    }

    /// Appends an operator reply. Does not change the handoff state.
    pub async fn reply(
        &self,
        conversation_id: &str,
        message: Option<&str>,
        admin: Option<&str>,
    ) -> Result<AdminOutcome, FrontdeskError> {
        let content = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| FrontdeskError::Validation("Message is required".into()))?;
        let author = admin_name(admin);

        let outcome = self
            .storage
            .add_message(conversation_id, Role::Admin, content, Some(&author))
            .await?;
        info!(conversation_id, admin = %author, "operator replied");
        Ok(AdminOutcome {
            conversation: outcome.conversation.into(),
            message: outcome.message,
        })
    }

    /// Suspends the bot and records a notice in the transcript. Both land
    /// together or not at all.
    pub async fn take_over(
        &self,
        conversation_id: &str,
        admin: Option<&str>,
        expected_version: Option<i64>,
    ) -> Result<AdminOutcome, FrontdeskError> {
        let operator = admin_name(admin);
        let notice = format!("{operator} has taken over this conversation.");
        let outcome = self
            .storage
            .take_over(conversation_id, &operator, &notice, expected_version)
            .await?;
        info!(conversation_id, admin = %operator, "conversation taken over");
        Ok(AdminOutcome {
            conversation: outcome.conversation.into(),
            message: outcome.message,
        })
    }

    /// Hands the conversation back to the bot.
    pub async fn release(
        &self,
        conversation_id: &str,
        expected_version: Option<i64>,
    ) -> Result<AdminOutcome, FrontdeskError> {
        let outcome = self
            .storage
            .release(conversation_id, RELEASE_NOTICE, expected_version)
            .await?;
        info!(conversation_id, "conversation released to bot");
        Ok(AdminOutcome {
            conversation: outcome.conversation.into(),
            message: outcome.message,
        })
    }
}
