// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration catalog trait.

use async_trait::async_trait;

use crate::error::FrontdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{IntegrationQuery, IntegrationResults};

/// Adapter for the third-party app directory shown on the integrations page.
#[async_trait]
pub trait CatalogAdapter: PluginAdapter {
    /// Searches the catalog. An empty query returns popular apps.
    async fn search(&self, query: IntegrationQuery)
    -> Result<IntegrationResults, FrontdeskError>;
}
