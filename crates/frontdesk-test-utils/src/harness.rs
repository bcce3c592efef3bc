// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for service and end-to-end tests.
//!
//! `TestHarness` pairs a temp-file SQLite store with mock upstream adapters
//! and a default configuration. Services under test are built from its
//! fields.

use std::sync::Arc;

use frontdesk_config::model::FrontdeskConfig;
use frontdesk_core::{FrontdeskError, StorageAdapter};
use frontdesk_storage::SqliteStorage;

use crate::mock_provider::{MockProvider, MockReply};
use crate::mock_services::{MockCatalog, MockMailer, MockPayments};

/// Builder for test environments.
pub struct TestHarnessBuilder {
    replies: Vec<MockReply>,
    failing_mail: bool,
    unconfigured_payments: bool,
    config: FrontdeskConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        let mut config = FrontdeskConfig::default();
        config.admin.bearer_token = Some("test-admin-token".to_string());
        config.chat.system_prompt = Some("You are a test assistant.".to_string());
        Self {
            replies: Vec::new(),
            failing_mail: false,
            unconfigured_payments: false,
            config,
        }
    }

    /// Successful provider replies, in order.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.replies
            .extend(responses.into_iter().map(MockReply::Text));
        self
    }

    /// Scripted provider outcomes, including failures.
    pub fn with_replies(mut self, replies: Vec<MockReply>) -> Self {
        self.replies.extend(replies);
        self
    }

    /// Every email send fails.
    pub fn with_failing_mail(mut self) -> Self {
        self.failing_mail = true;
        self
    }

    pub fn with_unconfigured_payments(mut self) -> Self {
        self.unconfigured_payments = true;
        self
    }

    /// Adjusts the configuration before the harness is built.
    pub fn with_config(mut self, edit: impl FnOnce(&mut FrontdeskConfig)) -> Self {
        edit(&mut self.config);
        self
    }

    pub async fn build(mut self) -> Result<TestHarness, FrontdeskError> {
        let temp_dir = tempfile::TempDir::new().map_err(FrontdeskError::storage)?;
        let db_path = temp_dir.path().join("test.db");
        self.config.storage.database_path = db_path.to_string_lossy().to_string();

        let storage = SqliteStorage::new(self.config.storage.clone());
        storage.initialize().await?;

        let mailer = MockMailer::new();
        mailer.set_failing(self.failing_mail);

        let payments = if self.unconfigured_payments {
            MockPayments::unconfigured()
        } else {
            MockPayments::new()
        };

        Ok(TestHarness {
            storage: Arc::new(storage),
            provider: Arc::new(MockProvider::with_replies(self.replies)),
            mailer: Arc::new(mailer),
            payments: Arc::new(payments),
            catalog: Arc::new(MockCatalog::with_sample_apps()),
            config: self.config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with mock adapters and temp storage.
pub struct TestHarness {
    /// SQLite storage (temp DB, removed on drop).
    pub storage: Arc<dyn StorageAdapter>,
    pub provider: Arc<MockProvider>,
    pub mailer: Arc<MockMailer>,
    pub payments: Arc<MockPayments>,
    pub catalog: Arc<MockCatalog>,
    /// Configuration with the temp database path and a test admin token.
    pub config: FrontdeskConfig,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A harness with default mocks.
    pub async fn new() -> Result<Self, FrontdeskError> {
        Self::builder().build().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk_core::types::Role;

    #[tokio::test]
    async fn harness_storage_is_usable() {
        let harness = TestHarness::new().await.unwrap();
        let outcome = harness
            .storage
            .add_message("conv-1", Role::User, "hello", None)
            .await
            .unwrap();
        assert!(outcome.created);
        assert_eq!(
            harness.config.admin.bearer_token.as_deref(),
            Some("test-admin-token")
        );
    }

    #[tokio::test]
    async fn config_edits_apply() {
        let harness = TestHarness::builder()
            .with_config(|c| c.leads.waitlist_base_count = 10)
            .build()
            .await
            .unwrap();
        assert_eq!(harness.config.leads.waitlist_base_count, 10);
    }
}
