// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System prompt loading and completion prompt assembly.

use frontdesk_config::model::ChatConfig;
use frontdesk_core::types::{ChatMessage, CompletionRequest, PromptMessage, PromptRole, Role};
use tracing::{info, warn};

/// Built-in instruction with the product knowledge base.
pub const DEFAULT_SYSTEM_PROMPT: &str = include_str!("../prompts/default_system_prompt.md");

/// Resolves the system prompt: file, then inline text, then the built-in default.
///
/// An unreadable or empty file is logged and skipped rather than failing startup.
pub async fn load_system_prompt(config: &ChatConfig) -> String {
    if let Some(ref file_path) = config.system_prompt_file {
        match tokio::fs::read_to_string(file_path).await {
            Ok(content) => {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    info!(path = file_path.as_str(), "loaded system prompt from file");
                    return trimmed.to_string();
                }
                warn!(path = file_path.as_str(), "system prompt file is empty, falling back");
            }
            Err(e) => {
                warn!(
                    path = file_path.as_str(),
                    error = %e,
                    "failed to read system prompt file, falling back"
                );
            }
        }
    }

    if let Some(ref prompt) = config.system_prompt {
        if !prompt.trim().is_empty() {
            return prompt.clone();
        }
    }

    DEFAULT_SYSTEM_PROMPT.trim().to_string()
}

/// Maps a stored role onto the prompt. System notices stay out of the prompt.
fn prompt_role(role: Role) -> Option<PromptRole> {
    match role {
        Role::User => Some(PromptRole::User),
        // Operator replies read as the assistant's own turns.
        Role::Assistant | Role::Admin => Some(PromptRole::Assistant),
        Role::System => None,
    }
}

/// Builds the request: system instruction, prior history, then the new message.
///
/// `history` must not contain the new message and is expected in insertion
/// order; only its last `history_limit` entries are used.
pub fn build_request(
    system_prompt: &str,
    history: &[ChatMessage],
    history_limit: usize,
    user_message: &str,
) -> CompletionRequest {
    let skip = history.len().saturating_sub(history_limit);
    let mut messages = Vec::with_capacity(history.len() - skip + 2);
    messages.push(PromptMessage::new(PromptRole::System, system_prompt));
    messages.extend(history[skip..].iter().filter_map(|msg| {
        prompt_role(msg.role).map(|role| PromptMessage::new(role, msg.content.clone()))
    }));
    messages.push(PromptMessage::new(PromptRole::User, user_message));
    CompletionRequest { messages }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(role: Role, content: &str) -> ChatMessage {
        ChatMessage {
            id: format!("m-{content}"),
            conversation_id: "c".into(),
            role,
            content: content.into(),
            author: None,
            timestamp: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    #[tokio::test]
    async fn default_prompt_mentions_contact() {
        let prompt = load_system_prompt(&ChatConfig::default()).await;
        assert!(prompt.starts_with("You are Lagentry Assistant"));
        assert!(prompt.contains("info@lagentry.com"));
    }

    #[tokio::test]
    async fn inline_prompt_beats_default() {
        let config = ChatConfig {
            system_prompt: Some("Be brief.".into()),
            ..ChatConfig::default()
        };
        assert_eq!(load_system_prompt(&config).await, "Be brief.");
    }

    #[tokio::test]
    async fn file_prompt_beats_inline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.md");
        std::fs::write(&path, "\n  From file.  \n").unwrap();
        let config = ChatConfig {
            system_prompt: Some("Inline.".into()),
            system_prompt_file: Some(path.to_string_lossy().to_string()),
            ..ChatConfig::default()
        };
        assert_eq!(load_system_prompt(&config).await, "From file.");
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_inline() {
        let config = ChatConfig {
            system_prompt: Some("Inline.".into()),
            system_prompt_file: Some("/nonexistent/prompt.md".into()),
            ..ChatConfig::default()
        };
        assert_eq!(load_system_prompt(&config).await, "Inline.");
    }

    #[test]
    fn maps_roles_and_skips_notices() {
        let history = vec![
            msg(Role::User, "hi"),
            msg(Role::Assistant, "hello"),
            msg(Role::System, "Ops has taken over this conversation."),
            msg(Role::Admin, "I'm a human"),
        ];
        let req = build_request("sys", &history, 20, "thanks");
        let roles: Vec<_> = req.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                PromptRole::System,
                PromptRole::User,
                PromptRole::Assistant,
                PromptRole::Assistant,
                PromptRole::User,
            ]
        );
        assert_eq!(req.messages[3].content, "I'm a human");
        assert_eq!(req.messages[4].content, "thanks");
    }

    #[test]
    fn keeps_only_most_recent_history() {
        let history: Vec<_> = (0..30).map(|i| msg(Role::User, &i.to_string())).collect();
        let req = build_request("sys", &history, 20, "new");
        assert_eq!(req.messages.len(), 22);
        assert_eq!(req.messages[1].content, "10");
        assert_eq!(req.messages[20].content, "29");
    }
}
