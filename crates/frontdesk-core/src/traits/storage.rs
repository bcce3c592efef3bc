// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for the conversation store and lead tables.

use async_trait::async_trait;

use crate::error::FrontdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{
    AppendOutcome, ChatMessage, Conversation, ConversationSummary, DemoBooking, LeadInsert,
    LeadSource, NewLead, Role,
};

/// Adapter for the persistence backend.
///
/// Every mutation of a conversation bumps its `version`. Handoff transitions
/// take an optional expected version; a mismatch fails with
/// [`FrontdeskError::Conflict`] and leaves the row untouched.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Opens the backend and runs migrations.
    async fn initialize(&self) -> Result<(), FrontdeskError>;

    /// Flushes pending writes and releases the connection.
    async fn close(&self) -> Result<(), FrontdeskError>;

    // --- Conversations ---

    /// Returns the conversation, creating an empty `bot` conversation if absent.
    async fn get_or_create_conversation(&self, id: &str) -> Result<Conversation, FrontdeskError>;

    /// Returns the conversation without creating it.
    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, FrontdeskError>;

    /// Appends a message, creating the conversation if needed.
    async fn add_message(
        &self,
        conversation_id: &str,
        role: Role,
        content: &str,
        author: Option<&str>,
    ) -> Result<AppendOutcome, FrontdeskError>;

    /// Appends an assistant reply only while the bot still serves the
    /// conversation. Returns `None`, storing nothing, once an operator has
    /// taken over.
    async fn add_bot_reply(
        &self,
        conversation_id: &str,
        content: &str,
    ) -> Result<Option<AppendOutcome>, FrontdeskError>;

    /// Messages in insertion order. With `limit`, only the most recent ones.
    async fn get_messages(
        &self,
        conversation_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ChatMessage>, FrontdeskError>;

    /// Hands the conversation to a human operator and appends `notice` as a
    /// system message, in one transaction.
    async fn take_over(
        &self,
        conversation_id: &str,
        operator: &str,
        notice: &str,
        expected_version: Option<i64>,
    ) -> Result<AppendOutcome, FrontdeskError>;

    /// Returns the conversation to the bot and appends `notice` as a system
    /// message, in one transaction.
    async fn release(
        &self,
        conversation_id: &str,
        notice: &str,
        expected_version: Option<i64>,
    ) -> Result<AppendOutcome, FrontdeskError>;

    /// Most recently updated conversations first, with the last
    /// `recent_user_messages` user messages of each.
    async fn list_conversations(
        &self,
        limit: usize,
        recent_user_messages: usize,
    ) -> Result<Vec<ConversationSummary>, FrontdeskError>;

    // --- Leads ---

    /// Inserts a lead unless one exists for the same `(email, source)`.
    async fn insert_lead(
        &self,
        source: LeadSource,
        lead: &NewLead,
    ) -> Result<LeadInsert, FrontdeskError>;

    /// Number of leads captured from a source.
    async fn count_leads(&self, source: LeadSource) -> Result<u64, FrontdeskError>;

    /// Persists a demo booking.
    async fn save_demo_booking(&self, booking: &DemoBooking) -> Result<(), FrontdeskError>;
}
