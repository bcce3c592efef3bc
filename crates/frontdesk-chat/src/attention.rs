// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flags conversations where the visitor seems to want a person.

use frontdesk_config::model::ChatConfig;

#[derive(Debug, Clone)]
pub struct AttentionPolicy {
    window: usize,
    /// Lowercased, non-empty.
    keywords: Vec<String>,
}

impl AttentionPolicy {
    pub fn new(window: usize, keywords: &[String]) -> Self {
        Self {
            window,
            keywords: keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(config.attention_window, &config.attention_keywords)
    }

    /// How many recent user messages to fetch per conversation.
    pub fn window(&self) -> usize {
        self.window
    }

    /// True when any of the last `window` user messages contains a keyword.
    /// `recent_user_messages` is oldest first.
    pub fn needs_attention(&self, recent_user_messages: &[String]) -> bool {
        let skip = recent_user_messages.len().saturating_sub(self.window);
        recent_user_messages[skip..].iter().any(|content| {
            let lowered = content.to_lowercase();
            self.keywords.iter().any(|k| lowered.contains(k.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> AttentionPolicy {
        AttentionPolicy::from_config(&ChatConfig::default())
    }

    fn msgs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert!(policy().needs_attention(&msgs(&["Can I TALK TO SOMEONE please"])));
        assert!(policy().needs_attention(&msgs(&["need Support"])));
    }

    #[test]
    fn plain_questions_do_not_flag() {
        assert!(!policy().needs_attention(&msgs(&["how much does it cost?", "thanks"])));
        assert!(!policy().needs_attention(&[]));
    }

    #[test]
    fn only_the_window_is_scanned() {
        let mut history = msgs(&["I want a human"]);
        history.extend(msgs(&["ok", "pricing?", "arabic?", "voice?", "thanks"]));
        assert!(!policy().needs_attention(&history));

        let narrow = AttentionPolicy::new(6, &ChatConfig::default().attention_keywords);
        assert!(narrow.needs_attention(&history));
    }

    #[test]
    fn custom_keywords_are_normalized() {
        let p = AttentionPolicy::new(3, &["  Refund ".to_string(), "   ".to_string()]);
        assert!(p.needs_attention(&msgs(&["I want a REFUND"])));
        assert!(!p.needs_attention(&msgs(&["hello"])));
    }
}
