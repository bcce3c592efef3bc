// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that every storage and upstream adapter implements.

use async_trait::async_trait;

use crate::error::FrontdeskError;
use crate::types::{AdapterType, HealthStatus};

/// Identity, lifecycle and health check shared by all adapters.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Kind of adapter (storage, provider, mailer, ...).
    fn adapter_type(&self) -> AdapterType;

    /// Reports the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError>;

    /// Releases held resources.
    async fn shutdown(&self) -> Result<(), FrontdeskError>;
}
