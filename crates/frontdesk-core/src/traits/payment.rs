// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment provider trait.

use async_trait::async_trait;

use crate::error::FrontdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CheckoutRequest, CheckoutSession};

/// Adapter for hosted checkout pages.
#[async_trait]
pub trait PaymentAdapter: PluginAdapter {
    /// Creates a subscription checkout session.
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, FrontdeskError>;
}
