// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider trait (OpenAI-compatible chat completions).

use async_trait::async_trait;

use crate::error::FrontdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for text-completion APIs.
///
/// Implementations make exactly one attempt per call. Quota and billing
/// refusals are reported as [`FrontdeskError::QuotaExceeded`] and a missing
/// API key as [`FrontdeskError::NotConfigured`] so callers can pick a
/// matching fallback.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, FrontdeskError>;
}
