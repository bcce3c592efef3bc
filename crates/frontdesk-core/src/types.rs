// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Frontdesk services.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Provider,
    Mailer,
    Payment,
    Catalog,
}

/// Current UTC time in the fixed-width format used for every stored timestamp.
///
/// Fixed width keeps lexicographic order equal to chronological order.
pub fn now_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

// --- Conversation types ---

/// Author role of a chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Website visitor.
    User,
    /// Automated assistant (completion API or canned fallback).
    Assistant,
    /// Human operator replying from the admin panel.
    Admin,
    /// Handoff notices and other bookkeeping.
    System,
}

/// Who currently answers a conversation.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HandoffStatus {
    /// The assistant replies to every user message.
    #[default]
    Bot,
    /// A human operator has taken over; user messages are only stored.
    Human,
}

/// Coarse conversation lifecycle flag.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    #[default]
    Active,
    Closed,
}

/// A conversation header. Messages are fetched separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub status: ConversationStatus,
    pub created_at: String,
    pub updated_at: String,
    pub handoff_status: HandoffStatus,
    pub handoff_at: Option<String>,
    pub handoff_by: Option<String>,
    /// Bumped on every write; used for optimistic concurrency.
    pub version: i64,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub conversation_id: String,
    pub role: Role,
    pub content: String,
    /// Operator display name for admin replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub timestamp: String,
}

/// A conversation as listed in the admin panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSummary {
    pub conversation: Conversation,
    pub message_count: u64,
    /// Content of the most recent user messages, oldest first.
    pub recent_user_messages: Vec<String>,
}

/// Result of appending a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    pub message: ChatMessage,
    /// Conversation header after the append.
    pub conversation: Conversation,
    /// True when this append created the conversation.
    pub created: bool,
}

// --- Lead types ---

/// Acquisition channel that produced a lead.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Waitlist,
    Newsletter,
    BookMeeting,
    LeadQualification,
}

/// A lead about to be written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLead {
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
}

/// A stored lead row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub email: String,
    pub source: LeadSource,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    pub created_at: String,
}

/// Outcome of a lead insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadInsert {
    /// True when a row for the same (email, source) already existed.
    pub duplicate: bool,
    /// The inserted row, `None` on duplicate.
    pub lead: Option<Lead>,
}

/// A booked product demo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoBooking {
    pub token: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub booking_date: String,
    pub booking_time: String,
    pub company: Option<String>,
    pub company_size: Option<String>,
    pub agent_of_interest: Option<String>,
    pub message: Option<String>,
    pub created_at: String,
}

// --- Completion types ---

/// Role of a message in a completion prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

/// One message of a completion prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn new(role: PromptRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A request to a completion provider. Model parameters come from provider config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub messages: Vec<PromptMessage>,
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// A completed response from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub finish_reason: Option<String>,
    pub usage: TokenUsage,
}

// --- Mail types ---

/// A rendered email ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Display name in the From header; the address comes from mailer config.
    pub from_name: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    /// Optional iCalendar body attached as a `text/calendar` alternative.
    pub calendar: Option<String>,
}

// --- Payment types ---

/// Parameters for a hosted subscription checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub price_id: String,
    pub plan_id: String,
    pub is_yearly: bool,
    pub customer_email: Option<String>,
    pub success_url: String,
    pub cancel_url: String,
}

/// A created checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

// --- Integration catalog types ---

/// A third-party app exposed by the integration catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationApp {
    pub app_id: String,
    pub app_name: String,
    pub description: String,
    pub logo_url: String,
    pub categories: Vec<String>,
    pub auth_type: Option<String>,
}

/// A catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntegrationQuery {
    /// Normalized (trimmed, lowercased) search text; empty means "popular".
    pub query: String,
    pub limit: usize,
}

/// Catalog search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationResults {
    pub apps: Vec<IntegrationApp>,
    pub from_cache: bool,
}
