// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails
//! at startup instead of silently falling back to a default.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level Frontdesk configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FrontdeskConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub email: EmailConfig,

    #[serde(default)]
    pub stripe: StripeConfig,

    #[serde(default)]
    pub composio: ComposioConfig,

    #[serde(default)]
    pub voice: VoiceConfig,

    #[serde(default)]
    pub leads: LeadsConfig,

    #[serde(default)]
    pub admin: AdminConfig,
}

fn redact(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "[REDACTED]",
        None => "<unset>",
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Frontend origin used for checkout redirects and email links.
    #[serde(default)]
    pub frontend_url: Option<String>,

    /// Public site URL used when neither `frontend_url` nor a request origin is known.
    #[serde(default = "default_public_url")]
    pub public_url: String,

    /// Origins allowed by CORS. `frontend_url` is always added.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            frontend_url: None,
            public_url: default_public_url(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl ServerConfig {
    /// Base URL for links that point back at the website.
    pub fn site_url(&self) -> &str {
        self.frontend_url.as_deref().unwrap_or(&self.public_url)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_public_url() -> String {
    "https://lagentry.com".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    [
        "https://lagentry.com",
        "https://www.lagentry.com",
        "https://aganret.com",
        "https://www.aganret.com",
        "http://localhost:3000",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("frontdesk").join("frontdesk.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("frontdesk.db"))
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Completion API settings (OpenAI-compatible chat completions).
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. Falls back to `OPENAI_API_KEY` when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_openai_timeout")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_openai_timeout(),
        }
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

fn default_openai_timeout() -> u64 {
    60
}

/// Chat assistant and admin panel settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Inline system prompt. Overridden by `system_prompt_file` if both are set.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a markdown file containing the system prompt.
    #[serde(default)]
    pub system_prompt_file: Option<String>,

    /// Prior messages sent to the completion API with each new message.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Number of recent user messages scanned for attention keywords.
    #[serde(default = "default_attention_window")]
    pub attention_window: usize,

    /// Case-insensitive phrases that flag a conversation for an operator.
    #[serde(default = "default_attention_keywords")]
    pub attention_keywords: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            system_prompt_file: None,
            history_limit: default_history_limit(),
            attention_window: default_attention_window(),
            attention_keywords: default_attention_keywords(),
        }
    }
}

fn default_history_limit() -> usize {
    20
}

fn default_attention_window() -> usize {
    5
}

fn default_attention_keywords() -> Vec<String> {
    [
        "human",
        "person",
        "agent",
        "representative",
        "support",
        "talk to someone",
        "speak with",
        "help me",
        "escalate",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// SMTP delivery settings.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmailConfig {
    /// When false, messages are logged and dropped instead of sent.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Connect with TLS from the first byte (port 465) instead of STARTTLS.
    #[serde(default)]
    pub implicit_tls: bool,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Display name in the From header.
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Inbox that receives internal notifications. Also the sender address
    /// when `username` is unset.
    #[serde(default = "default_company_email")]
    pub company_email: String,

    /// Upper bound on a single send, in seconds.
    #[serde(default = "default_send_timeout")]
    pub send_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            implicit_tls: false,
            username: None,
            password: None,
            from_name: default_from_name(),
            company_email: default_company_email(),
            send_timeout_secs: default_send_timeout(),
        }
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("enabled", &self.enabled)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("implicit_tls", &self.implicit_tls)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("from_name", &self.from_name)
            .field("company_email", &self.company_email)
            .field("send_timeout_secs", &self.send_timeout_secs)
            .finish()
    }
}

fn default_smtp_host() -> String {
    "smtp.hostinger.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_name() -> String {
    "Lagentry".to_string()
}

fn default_company_email() -> String {
    "info@lagentry.com".to_string()
}

fn default_send_timeout() -> u64 {
    4
}

/// Stripe Checkout settings.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StripeConfig {
    /// Secret key. Falls back to `STRIPE_SECRET_KEY` when unset.
    #[serde(default)]
    pub secret_key: Option<String>,

    #[serde(default = "default_stripe_base_url")]
    pub base_url: String,

    /// Price ids keyed by `{plan}-{monthly|yearly}`.
    #[serde(default = "default_prices")]
    pub prices: BTreeMap<String, String>,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            base_url: default_stripe_base_url(),
            prices: default_prices(),
        }
    }
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &redact(&self.secret_key))
            .field("base_url", &self.base_url)
            .field("prices", &self.prices)
            .finish()
    }
}

fn default_stripe_base_url() -> String {
    "https://api.stripe.com/v1".to_string()
}

fn default_prices() -> BTreeMap<String, String> {
    [
        ("hobby-20-monthly", "price_hobby_monthly"),
        ("hobby-20-yearly", "price_hobby_yearly"),
        ("startup-80-monthly", "price_startup_monthly"),
        ("startup-80-yearly", "price_startup_yearly"),
        ("growth-100-monthly", "price_growth_monthly"),
        ("growth-100-yearly", "price_growth_yearly"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Composio integration catalog settings.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ComposioConfig {
    /// API key. Falls back to `COMPOSIO_API_KEY` when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_apps_url")]
    pub apps_url: String,

    /// How long a search result stays cached, in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for ComposioConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            apps_url: default_apps_url(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

impl fmt::Debug for ComposioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposioConfig")
            .field("api_key", &redact(&self.api_key))
            .field("apps_url", &self.apps_url)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .finish()
    }
}

fn default_apps_url() -> String {
    "https://backend.composio.dev/api/v1/apps".to_string()
}

fn default_cache_ttl() -> u64 {
    300
}

/// Browser voice-call settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceConfig {
    /// Public (browser-safe) key handed to the voice SDK.
    #[serde(default)]
    pub public_key: Option<String>,

    /// Assistant ids keyed by agent type (`customer-support`, `lead-qualification`, ...).
    #[serde(default)]
    pub assistants: BTreeMap<String, String>,
}

/// Lead capture settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LeadsConfig {
    /// Added to the stored waitlist count before it is displayed.
    #[serde(default = "default_waitlist_base")]
    pub waitlist_base_count: u64,
}

impl Default for LeadsConfig {
    fn default() -> Self {
        Self {
            waitlist_base_count: default_waitlist_base(),
        }
    }
}

fn default_waitlist_base() -> u64 {
    5784
}

/// Admin panel access.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Bearer token required on every admin route. Unset rejects all admin requests.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("bearer_token", &redact(&self.bearer_token))
            .finish()
    }
}
