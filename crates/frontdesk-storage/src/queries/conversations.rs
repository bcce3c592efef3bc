// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation store: get-or-create, message append, handoff transitions.
//!
//! Each operation runs as one closure on the connection thread, so
//! get-or-create and append-with-touch are atomic. Handoff transitions are
//! guarded by the `version` column.

use frontdesk_core::FrontdeskError;
use frontdesk_core::types::{AppendOutcome, ConversationSummary};
use rusqlite::{Connection, OptionalExtension, params};

use crate::database::{Database, map_tr_err};
use crate::models::{
    CONVERSATION_COLUMNS, ChatMessage, Conversation, HandoffStatus, MESSAGE_COLUMNS, Role,
    conversation_from_row, message_from_row,
};

fn select_conversation(conn: &Connection, id: &str) -> rusqlite::Result<Option<Conversation>> {
    conn.query_row(
        &format!("SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE id = ?1"),
        params![id],
        conversation_from_row,
    )
    .optional()
}

/// Monotonic counter breaking `updated_at` ties in favour of the latest write.
fn next_write_seq(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COALESCE(MAX(write_seq), 0) + 1 FROM conversations",
        [],
        |row| row.get(0),
    )
}

/// Returns the conversation and whether this call created it.
fn ensure_conversation(
    conn: &Connection,
    id: &str,
    now: &str,
) -> rusqlite::Result<(Conversation, bool)> {
    let seq = next_write_seq(conn)?;
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO conversations (id, created_at, updated_at, write_seq)
         VALUES (?1, ?2, ?2, ?3)",
        params![id, now, seq],
    )?;
    let conversation = select_conversation(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
    Ok((conversation, inserted == 1))
}

/// Get the conversation, creating an empty `bot` conversation if absent.
pub async fn get_or_create(
    db: &Database,
    id: &str,
    now: &str,
) -> Result<Conversation, FrontdeskError> {
    let id = id.to_string();
    let now = now.to_string();
    db.connection()
        .call(move |conn| -> Result<Conversation, rusqlite::Error> {
            let tx = conn.transaction()?;
            let (conversation, _) = ensure_conversation(&tx, &id, &now)?;
            tx.commit()?;
            Ok(conversation)
        })
        .await
        .map_err(map_tr_err)
}

/// Get the conversation without creating it.
pub async fn get(db: &Database, id: &str) -> Result<Option<Conversation>, FrontdeskError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<Conversation>, rusqlite::Error> {
            select_conversation(conn, &id)
        })
        .await
        .map_err(map_tr_err)
}

/// A message to append.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub author: Option<String>,
}

/// Insert `message` and touch the conversation's `updated_at` and `version`.
/// Runs inside the caller's transaction.
fn append(
    tx: &Connection,
    conversation_id: &str,
    message: NewMessage,
    now: &str,
    created: bool,
) -> rusqlite::Result<AppendOutcome> {
    tx.execute(
        "INSERT INTO chat_messages (id, conversation_id, role, content, author, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            message.id,
            conversation_id,
            message.role.to_string(),
            message.content,
            message.author,
            now,
        ],
    )?;
    let seq = next_write_seq(tx)?;
    tx.execute(
        "UPDATE conversations
         SET updated_at = ?2, version = version + 1, write_seq = ?3
         WHERE id = ?1",
        params![conversation_id, now, seq],
    )?;
    let conversation =
        select_conversation(tx, conversation_id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;

    Ok(AppendOutcome {
        message: ChatMessage {
            id: message.id,
            conversation_id: conversation_id.to_string(),
            role: message.role,
            content: message.content,
            author: message.author,
            timestamp: now.to_string(),
        },
        conversation,
        created,
    })
}

/// Append a message, creating the conversation if needed, and touch the
/// conversation's `updated_at` and `version`.
pub async fn add_message(
    db: &Database,
    conversation_id: &str,
    message: NewMessage,
    now: &str,
) -> Result<AppendOutcome, FrontdeskError> {
    let conversation_id = conversation_id.to_string();
    let now = now.to_string();
    db.connection()
        .call(move |conn| -> Result<AppendOutcome, rusqlite::Error> {
            let tx = conn.transaction()?;
            let (_, created) = ensure_conversation(&tx, &conversation_id, &now)?;
            let outcome = append(&tx, &conversation_id, message, &now, created)?;
            tx.commit()?;
            Ok(outcome)
        })
        .await
        .map_err(map_tr_err)
}

/// Append `message` only if the conversation is still served by the bot.
/// Returns `None` and writes nothing when an operator holds it.
pub async fn add_if_bot(
    db: &Database,
    conversation_id: &str,
    message: NewMessage,
    now: &str,
) -> Result<Option<AppendOutcome>, FrontdeskError> {
    let conversation_id = conversation_id.to_string();
    let now = now.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<AppendOutcome>, rusqlite::Error> {
            let tx = conn.transaction()?;
            let (current, created) = ensure_conversation(&tx, &conversation_id, &now)?;
            if current.handoff_status != HandoffStatus::Bot {
                return Ok(None);
            }
            let outcome = append(&tx, &conversation_id, message, &now, created)?;
            tx.commit()?;
            Ok(Some(outcome))
        })
        .await
        .map_err(map_tr_err)
}

/// Messages in insertion order. With `limit`, the most recent `limit`
/// messages, still oldest first.
pub async fn get_messages(
    db: &Database,
    conversation_id: &str,
    limit: Option<usize>,
) -> Result<Vec<ChatMessage>, FrontdeskError> {
    let conversation_id = conversation_id.to_string();
    let limit = limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX)).unwrap_or(-1);
    db.connection()
        .call(move |conn| -> Result<Vec<ChatMessage>, rusqlite::Error> {
            // LIMIT -1 means no limit in SQLite.
            let mut stmt = conn.prepare(&format!(
                "SELECT {MESSAGE_COLUMNS} FROM (
                     SELECT seq, {MESSAGE_COLUMNS} FROM chat_messages
                     WHERE conversation_id = ?1
                     ORDER BY seq DESC LIMIT ?2
                 ) ORDER BY seq ASC"
            ))?;
            let rows = stmt.query_map(params![conversation_id, limit], message_from_row)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Target state of a handoff transition.
#[derive(Debug, Clone)]
pub enum Handoff {
    /// Hand the conversation to `operator`.
    Human { operator: String },
    /// Return the conversation to the bot.
    Bot,
}

/// Apply a handoff transition and append `notice` in the same transaction.
/// With `expected_version`, the update only happens if the stored version
/// still matches; otherwise [`FrontdeskError::Conflict`] is returned and
/// nothing changes.
pub async fn set_handoff(
    db: &Database,
    conversation_id: &str,
    handoff: Handoff,
    notice: NewMessage,
    expected_version: Option<i64>,
    now: &str,
) -> Result<AppendOutcome, FrontdeskError> {
    let conversation_id = conversation_id.to_string();
    let now = now.to_string();
    db.connection()
        .call(
            move |conn| -> Result<Result<AppendOutcome, FrontdeskError>, rusqlite::Error> {
                let tx = conn.transaction()?;
                let (current, created) = ensure_conversation(&tx, &conversation_id, &now)?;
                let expected = expected_version.unwrap_or(current.version);
                if expected != current.version {
                    return Ok(Err(FrontdeskError::Conflict {
                        id: conversation_id,
                        expected,
                        actual: current.version,
                    }));
                }

                let (status, at, by) = match handoff {
                    Handoff::Human { operator } => {
                        (HandoffStatus::Human, Some(now.clone()), Some(operator))
                    }
                    Handoff::Bot => (HandoffStatus::Bot, None, None),
                };
                let seq = next_write_seq(&tx)?;
                let changed = tx.execute(
                    "UPDATE conversations
                     SET handoff_status = ?2, handoff_at = ?3, handoff_by = ?4,
                         status = 'active', updated_at = ?5, version = version + 1,
                         write_seq = ?6
                     WHERE id = ?1 AND version = ?7",
                    params![conversation_id, status.to_string(), at, by, now, seq, expected],
                )?;
                if changed == 0 {
                    let actual = select_conversation(&tx, &conversation_id)?
                        .map(|c| c.version)
                        .unwrap_or_default();
                    return Ok(Err(FrontdeskError::Conflict {
                        id: conversation_id,
                        expected,
                        actual,
                    }));
                }

                let outcome = append(&tx, &conversation_id, notice, &now, created)?;
                tx.commit()?;
                Ok(Ok(outcome))
            },
        )
        .await
        .map_err(map_tr_err)?
}

/// Most recently updated conversations first, each with its message count and
/// the content of its last `recent_user_messages` user messages (oldest first).
pub async fn list(
    db: &Database,
    limit: usize,
    recent_user_messages: usize,
) -> Result<Vec<ConversationSummary>, FrontdeskError> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let recent = i64::try_from(recent_user_messages).unwrap_or(i64::MAX);
    db.connection()
        .call(move |conn| -> Result<Vec<ConversationSummary>, rusqlite::Error> {
            let conversations: Vec<Conversation> = {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {CONVERSATION_COLUMNS} FROM conversations
                     ORDER BY updated_at DESC, write_seq DESC LIMIT ?1"
                ))?;
                stmt.query_map(params![limit], conversation_from_row)?
                    .collect::<Result<_, _>>()?
            };

            let mut count_stmt =
                conn.prepare("SELECT COUNT(*) FROM chat_messages WHERE conversation_id = ?1")?;
            let mut recent_stmt = conn.prepare(
                "SELECT content FROM (
                     SELECT seq, content FROM chat_messages
                     WHERE conversation_id = ?1 AND role = 'user'
                     ORDER BY seq DESC LIMIT ?2
                 ) ORDER BY seq ASC",
            )?;

            let mut summaries = Vec::with_capacity(conversations.len());
            for conversation in conversations {
                let message_count: i64 =
                    count_stmt.query_row(params![conversation.id], |row| row.get(0))?;
                let recent_user_messages = recent_stmt
                    .query_map(params![conversation.id, recent], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                summaries.push(ConversationSummary {
                    message_count: u64::try_from(message_count).unwrap_or_default(),
                    recent_user_messages,
                    conversation,
                });
            }
            Ok(summaries)
        })
        .await
        .map_err(map_tr_err)
}
