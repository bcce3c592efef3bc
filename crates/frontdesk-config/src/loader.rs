// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./frontdesk.toml` > `~/.config/frontdesk/frontdesk.toml` >
//! `/etc/frontdesk/frontdesk.toml`, with `FRONTDESK_` environment overrides
//! on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::FrontdeskConfig;

/// Config sections addressable through `FRONTDESK_<SECTION>_<KEY>`.
const SECTIONS: &[&str] = &[
    "server", "storage", "openai", "chat", "email", "stripe", "composio", "voice", "leads",
    "admin",
];

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/frontdesk/frontdesk.toml`
/// 3. `~/.config/frontdesk/frontdesk.toml`
/// 4. `./frontdesk.toml`
/// 5. `FRONTDESK_*` environment variables
pub fn load_config() -> Result<FrontdeskConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<FrontdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FrontdeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FrontdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FrontdeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(FrontdeskConfig::default()))
        .merge(Toml::file("/etc/frontdesk/frontdesk.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("frontdesk/frontdesk.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("frontdesk.toml"))
        .merge(env_provider())
}

/// Fill unset upstream credentials from their conventional env vars
/// (`OPENAI_API_KEY`, `STRIPE_SECRET_KEY`, `COMPOSIO_API_KEY`).
pub fn apply_credential_fallbacks(config: &mut FrontdeskConfig) {
    fill_from_env(&mut config.openai.api_key, "OPENAI_API_KEY");
    fill_from_env(&mut config.stripe.secret_key, "STRIPE_SECRET_KEY");
    fill_from_env(&mut config.composio.api_key, "COMPOSIO_API_KEY");
}

fn fill_from_env(slot: &mut Option<String>, var: &str) {
    if slot.as_deref().is_some_and(|v| !v.trim().is_empty()) {
        return;
    }
    if let Ok(value) = std::env::var(var)
        && !value.trim().is_empty()
    {
        tracing::debug!(var, "using credential from environment");
        *slot = Some(value);
    }
}

/// Environment provider mapping `FRONTDESK_<SECTION>_<KEY>` to `section.key`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `FRONTDESK_ADMIN_BEARER_TOKEN` maps to `admin.bearer_token`.
fn env_provider() -> Env {
    Env::prefixed("FRONTDESK_").map(|key| {
        let key_str = key.as_str();
        for section in SECTIONS {
            if let Some(rest) = key_str
                .strip_prefix(section)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.to_string().into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_maps_section_and_key() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("FRONTDESK_ADMIN_BEARER_TOKEN", "s3cret");
            jail.set_env("FRONTDESK_SERVER_PORT", "8080");
            jail.set_env("FRONTDESK_CHAT_HISTORY_LIMIT", "7");
            let config = load_config()?;
            assert_eq!(config.admin.bearer_token.as_deref(), Some("s3cret"));
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.chat.history_limit, 7);
            Ok(())
        });
    }

    #[test]
    fn local_file_is_picked_up() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "frontdesk.toml",
                r#"
                [openai]
                model = "gpt-4o"
                "#,
            )?;
            let config = load_config()?;
            assert_eq!(config.openai.model, "gpt-4o");
            Ok(())
        });
    }

    #[test]
    fn credential_fallback_reads_conventional_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OPENAI_API_KEY", "sk-from-env");
            jail.set_env("STRIPE_SECRET_KEY", "");
            let mut config = load_config_from_str("")?;
            config.stripe.secret_key = None;
            apply_credential_fallbacks(&mut config);
            assert_eq!(config.openai.api_key.as_deref(), Some("sk-from-env"));
            assert!(config.stripe.secret_key.is_none());
            Ok(())
        });
    }

    #[test]
    fn explicit_key_beats_env_fallback() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OPENAI_API_KEY", "sk-from-env");
            let mut config = load_config_from_str("[openai]\napi_key = \"sk-file\"\n")?;
            apply_credential_fallbacks(&mut config);
            assert_eq!(config.openai.api_key.as_deref(), Some("sk-file"));
            Ok(())
        });
    }
}
