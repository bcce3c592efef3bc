// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Website chat: one user message in, at most one assistant message out.
//!
//! A conversation is either bot-serving (`handoff_status = bot`) or
//! human-controlled (`human`). In the human state user messages are stored
//! and nothing else happens; the operator answers from the admin panel.

use std::sync::Arc;
use std::time::Duration;

use frontdesk_config::model::FrontdeskConfig;
use frontdesk_core::error::FrontdeskError;
use frontdesk_core::traits::{MailerAdapter, ProviderAdapter, StorageAdapter};
use frontdesk_core::types::{ChatMessage, HandoffStatus, Role};
use frontdesk_email::{EmailTemplates, send_with_timeout};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::fallback::FallbackReplies;
use crate::prompt::build_request;

/// Outcome of one user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub conversation_id: String,
    /// Id of the assistant message, or of the stored user message when no
    /// reply was produced.
    pub message_id: String,
    /// `None` while a human operator controls the conversation.
    pub response: Option<String>,
    #[serde(rename = "handoff_status")]
    pub handoff_status: HandoffStatus,
}

pub struct ChatService {
    storage: Arc<dyn StorageAdapter>,
    provider: Arc<dyn ProviderAdapter>,
    mailer: Arc<dyn MailerAdapter>,
    templates: EmailTemplates,
    fallbacks: FallbackReplies,
    system_prompt: String,
    history_limit: usize,
    mail_timeout: Duration,
}

impl ChatService {
    pub fn new(
        config: &FrontdeskConfig,
        system_prompt: String,
        storage: Arc<dyn StorageAdapter>,
        provider: Arc<dyn ProviderAdapter>,
        mailer: Arc<dyn MailerAdapter>,
    ) -> Self {
        Self {
            templates: EmailTemplates::from_config(&config.email, config.server.site_url()),
            fallbacks: FallbackReplies::new(&config.email.from_name, &config.email.company_email),
            system_prompt,
            history_limit: config.chat.history_limit,
            mail_timeout: Duration::from_secs(config.email.send_timeout_secs),
            storage,
            provider,
            mailer,
        }
    }

    /// Stores a user message and, while the bot serves the conversation,
    /// answers it. Provider failures become a persisted fallback reply.
    pub async fn handle_message(
        &self,
        message: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatReply, FrontdeskError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(FrontdeskError::Validation("Message is required".into()));
        }
        let conversation_id = conversation_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let stored = self
            .storage
            .add_message(&conversation_id, Role::User, message, None)
            .await?;

        if stored.created {
            self.notify_new_conversation(&stored.message).await;
        }

        if stored.conversation.handoff_status == HandoffStatus::Human {
            debug!(conversation_id = %conversation_id, "human operator in control; no bot reply");
            return Ok(ChatReply {
                conversation_id,
                message_id: stored.message.id,
                response: None,
                handoff_status: HandoffStatus::Human,
            });
        }

        // One extra row covers the message just stored, which is filtered out.
        let history: Vec<ChatMessage> = self
            .storage
            .get_messages(&conversation_id, Some(self.history_limit + 1))
            .await?
            .into_iter()
            .filter(|m| m.id != stored.message.id)
            .collect();
        let request = build_request(&self.system_prompt, &history, self.history_limit, message);

        let reply = match self.provider.complete(request).await {
            Ok(response) => {
                debug!(
                    conversation_id = %conversation_id,
                    prompt_tokens = response.usage.prompt_tokens,
                    completion_tokens = response.usage.completion_tokens,
                    "completion received"
                );
                response.content
            }
            Err(e) => {
                match &e {
                    FrontdeskError::QuotaExceeded { .. } | FrontdeskError::NotConfigured(_) => {
                        warn!(conversation_id = %conversation_id, error = %e, "using fallback reply");
                    }
                    _ => {
                        error!(conversation_id = %conversation_id, error = %e, "completion failed; using fallback reply");
                    }
                }
                self.fallbacks.for_error(&e).to_string()
            }
        };

        // An operator may have taken over while the completion was running.
        let Some(saved) = self.storage.add_bot_reply(&conversation_id, &reply).await? else {
            info!(conversation_id = %conversation_id, "operator took over during completion; bot reply discarded");
            return Ok(ChatReply {
                conversation_id,
                message_id: stored.message.id,
                response: None,
                handoff_status: HandoffStatus::Human,
            });
        };

        Ok(ChatReply {
            conversation_id,
            message_id: saved.message.id,
            response: Some(reply),
            handoff_status: HandoffStatus::Bot,
        })
    }

    /// All messages of a conversation; empty for unknown ids.
    pub async fn conversation_messages(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<ChatMessage>, FrontdeskError> {
        self.storage.get_messages(conversation_id, None).await
    }

    async fn notify_new_conversation(&self, first: &ChatMessage) {
        let email = self.templates.chat_notification(
            &first.conversation_id,
            &first.content,
            &first.timestamp,
        );
        match send_with_timeout(self.mailer.as_ref(), email, self.mail_timeout).await {
            Ok(()) => info!(conversation_id = %first.conversation_id, "new chat notification sent"),
            Err(e) => warn!(
                conversation_id = %first.conversation_id,
                error = %e,
                "failed to send new chat notification"
            ),
        }
    }
}
