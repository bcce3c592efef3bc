// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for semantic constraints serde cannot express.

use crate::diagnostic::ConfigError;
use crate::model::FrontdeskConfig;

/// Validate a deserialized configuration, collecting every error.
pub fn validate_config(config: &FrontdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else if host.parse::<std::net::IpAddr>().is_err()
        && !host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        fail(format!(
            "server.host `{host}` is not a valid IP address or hostname"
        ));
    }

    for origin in &config.server.allowed_origins {
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            fail(format!(
                "server.allowed_origins entry `{origin}` must start with http:// or https://"
            ));
        }
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if !(0.0..=2.0).contains(&config.openai.temperature) {
        fail(format!(
            "openai.temperature must be between 0 and 2, got {}",
            config.openai.temperature
        ));
    }

    if config.openai.max_tokens == 0 {
        fail("openai.max_tokens must be at least 1".to_string());
    }

    if config.chat.history_limit < 1 {
        fail("chat.history_limit must be at least 1".to_string());
    }

    if config.chat.attention_window < 1 {
        fail("chat.attention_window must be at least 1".to_string());
    }

    if config
        .chat
        .attention_keywords
        .iter()
        .any(|k| k.trim().is_empty())
    {
        fail("chat.attention_keywords must not contain empty entries".to_string());
    }

    if config.email.enabled && config.email.smtp_host.trim().is_empty() {
        fail("email.smtp_host is required when email.enabled = true".to_string());
    }

    if config.email.send_timeout_secs == 0 {
        fail("email.send_timeout_secs must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&FrontdeskConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = FrontdeskConfig::default();
        config.server.host = "  ".into();
        config.openai.temperature = 3.5;
        config.chat.history_limit = 0;
        config.chat.attention_window = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn enabled_email_needs_host() {
        let mut config = FrontdeskConfig::default();
        config.email.enabled = true;
        config.email.smtp_host = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("email.smtp_host"));
    }

    #[test]
    fn rejects_bare_origin() {
        let mut config = FrontdeskConfig::default();
        config.server.allowed_origins = vec!["lagentry.com".into()];
        assert!(validate_config(&config).is_err());
    }
}
