// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage entities and their row mappings.
//!
//! The canonical types live in `frontdesk-core::types`; this module adds the
//! conversions from SQLite rows.

use std::str::FromStr;

use rusqlite::Row;
use rusqlite::types::Type;

pub use frontdesk_core::types::{
    ChatMessage, Conversation, ConversationStatus, DemoBooking, HandoffStatus, Lead, LeadSource,
    Role,
};

/// Column list matching [`conversation_from_row`].
pub const CONVERSATION_COLUMNS: &str =
    "id, status, handoff_status, handoff_at, handoff_by, version, created_at, updated_at";

/// Column list matching [`message_from_row`].
pub const MESSAGE_COLUMNS: &str = "id, conversation_id, role, content, author, created_at";

/// Column list matching [`lead_from_row`].
pub const LEAD_COLUMNS: &str = "id, email, source, name, phone, company, message, created_at";

fn parse_column<T: FromStr>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub fn conversation_from_row(row: &Row<'_>) -> rusqlite::Result<Conversation> {
    Ok(Conversation {
        id: row.get(0)?,
        status: parse_column(row, 1)?,
        handoff_status: parse_column(row, 2)?,
        handoff_at: row.get(3)?,
        handoff_by: row.get(4)?,
        version: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

pub fn message_from_row(row: &Row<'_>) -> rusqlite::Result<ChatMessage> {
    Ok(ChatMessage {
        id: row.get(0)?,
        conversation_id: row.get(1)?,
        role: parse_column(row, 2)?,
        content: row.get(3)?,
        author: row.get(4)?,
        timestamp: row.get(5)?,
    })
}

pub fn lead_from_row(row: &Row<'_>) -> rusqlite::Result<Lead> {
    Ok(Lead {
        id: row.get(0)?,
        email: row.get(1)?,
        source: parse_column(row, 2)?,
        name: row.get(3)?,
        phone: row.get(4)?,
        company: row.get(5)?,
        message: row.get(6)?,
        created_at: row.get(7)?,
    })
}
