// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use frontdesk_config::model::StorageConfig;
use frontdesk_core::types::{
    AppendOutcome, ChatMessage, Conversation, ConversationSummary, DemoBooking, LeadInsert,
    LeadSource, NewLead, Role, now_timestamp,
};
use frontdesk_core::{AdapterType, FrontdeskError, HealthStatus, PluginAdapter, StorageAdapter};

use crate::database::{Database, map_tr_err};
use crate::queries;
use crate::queries::conversations::{Handoff, NewMessage};

/// SQLite-backed storage adapter.
///
/// The database is opened on [`StorageAdapter::initialize`]; every other
/// call fails until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage. The file is not opened until `initialize`.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, FrontdeskError> {
        self.db.get().ok_or_else(|| FrontdeskError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    async fn checkpoint(&self) -> Result<(), FrontdeskError> {
        if let Some(db) = self.db.get() {
            db.connection()
                .call(|conn| -> Result<(), rusqlite::Error> {
                    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                    Ok(())
                })
                .await
                .map_err(map_tr_err)?;
            debug!("WAL checkpoint complete");
        }
        Ok(())
    }
}

fn new_message(role: Role, content: &str, author: Option<&str>) -> NewMessage {
    NewMessage {
        id: uuid::Uuid::new_v4().to_string(),
        role,
        content: content.to_string(),
        author: author.map(str::to_string),
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        self.checkpoint().await
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), FrontdeskError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| FrontdeskError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), FrontdeskError> {
        self.db()?;
        self.checkpoint().await
    }

    // --- Conversations ---

    async fn get_or_create_conversation(&self, id: &str) -> Result<Conversation, FrontdeskError> {
        queries::conversations::get_or_create(self.db()?, id, &now_timestamp()).await
    }

    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, FrontdeskError> {
        queries::conversations::get(self.db()?, id).await
    }

    async fn add_message(
        &self,
        conversation_id: &str,
        role: Role,
        content: &str,
        author: Option<&str>,
    ) -> Result<AppendOutcome, FrontdeskError> {
        let message = new_message(role, content, author);
        queries::conversations::add_message(self.db()?, conversation_id, message, &now_timestamp())
            .await
    }

    async fn add_bot_reply(
        &self,
        conversation_id: &str,
        content: &str,
    ) -> Result<Option<AppendOutcome>, FrontdeskError> {
        let message = new_message(Role::Assistant, content, None);
        queries::conversations::add_if_bot(self.db()?, conversation_id, message, &now_timestamp())
            .await
    }

    async fn get_messages(
        &self,
        conversation_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ChatMessage>, FrontdeskError> {
        queries::conversations::get_messages(self.db()?, conversation_id, limit).await
    }

    async fn take_over(
        &self,
        conversation_id: &str,
        operator: &str,
        notice: &str,
        expected_version: Option<i64>,
    ) -> Result<AppendOutcome, FrontdeskError> {
        let handoff = Handoff::Human {
            operator: operator.to_string(),
        };
        queries::conversations::set_handoff(
            self.db()?,
            conversation_id,
            handoff,
            new_message(Role::System, notice, None),
            expected_version,
            &now_timestamp(),
        )
        .await
    }

    async fn release(
        &self,
        conversation_id: &str,
        notice: &str,
        expected_version: Option<i64>,
    ) -> Result<AppendOutcome, FrontdeskError> {
        queries::conversations::set_handoff(
            self.db()?,
            conversation_id,
            Handoff::Bot,
            new_message(Role::System, notice, None),
            expected_version,
            &now_timestamp(),
        )
        .await
    }

    async fn list_conversations(
        &self,
        limit: usize,
        recent_user_messages: usize,
    ) -> Result<Vec<ConversationSummary>, FrontdeskError> {
        queries::conversations::list(self.db()?, limit, recent_user_messages).await
    }

    // --- Leads ---

    async fn insert_lead(
        &self,
        source: LeadSource,
        lead: &NewLead,
    ) -> Result<LeadInsert, FrontdeskError> {
        queries::leads::insert_lead(self.db()?, source, lead, &now_timestamp()).await
    }

    async fn count_leads(&self, source: LeadSource) -> Result<u64, FrontdeskError> {
        queries::leads::count_leads(self.db()?, source).await
    }

    async fn save_demo_booking(&self, booking: &DemoBooking) -> Result<(), FrontdeskError> {
        queries::bookings::save_booking(self.db()?, booking).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk_core::HandoffStatus;
    use tempfile::tempdir;

    fn make_config(path: &std::path::Path) -> StorageConfig {
        StorageConfig {
            database_path: path.to_str().unwrap().to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn identity_and_lifecycle() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("adapter.db");
        let storage = SqliteStorage::new(make_config(&db_path));

        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.adapter_type(), AdapterType::Storage);
        assert!(storage.health_check().await.is_err(), "not initialized yet");

        storage.initialize().await.unwrap();
        assert!(db_path.exists());
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);
        assert!(storage.initialize().await.is_err(), "second initialize fails");

        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn new_conversation_starts_with_bot() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(make_config(&dir.path().join("bot.db")));
        storage.initialize().await.unwrap();

        let conversation = storage.get_or_create_conversation("c1").await.unwrap();
        assert_eq!(conversation.handoff_status, HandoffStatus::Bot);

        let appended = storage
            .add_message("c1", Role::User, "hello", None)
            .await
            .unwrap();
        assert!(!appended.created);
        assert_eq!(appended.message.id.len(), 36, "uuid v4");

        let taken = storage
            .take_over("c1", "Sara", "Sara has taken over this conversation.", None)
            .await
            .unwrap();
        assert_eq!(taken.conversation.handoff_status, HandoffStatus::Human);
        assert_eq!(taken.message.role, Role::System);
        assert!(
            storage.add_bot_reply("c1", "too late").await.unwrap().is_none(),
            "bot reply after takeover is discarded"
        );

        let released = storage
            .release("c1", "released", Some(taken.conversation.version))
            .await
            .unwrap();
        assert_eq!(released.conversation.handoff_status, HandoffStatus::Bot);
        let reply = storage.add_bot_reply("c1", "welcome back").await.unwrap();
        assert_eq!(reply.unwrap().message.role, Role::Assistant);
        assert_eq!(storage.get_messages("c1", None).await.unwrap().len(), 4);

        storage.close().await.unwrap();
    }
}
