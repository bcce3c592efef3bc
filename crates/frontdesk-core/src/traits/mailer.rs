// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mail transport trait.

use async_trait::async_trait;

use crate::error::FrontdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::OutboundEmail;

/// Adapter for outbound email delivery.
#[async_trait]
pub trait MailerAdapter: PluginAdapter {
    /// Delivers one message. Implementations do not retry.
    async fn send(&self, email: OutboundEmail) -> Result<(), FrontdeskError>;

    /// Address that receives internal notifications (new chats, bookings).
    fn company_address(&self) -> &str;
}
