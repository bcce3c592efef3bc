// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound email for Frontdesk.
//!
//! [`SmtpMailer`] delivers through lettre's async SMTP transport;
//! [`LogMailer`] stands in when `email.enabled = false`. [`EmailTemplates`]
//! renders every message the site sends, and [`send_with_timeout`] bounds a
//! single delivery.

pub mod ics;
pub mod mailer;
pub mod templates;

use std::sync::Arc;
use std::time::Duration;

use frontdesk_config::model::EmailConfig;
use frontdesk_core::error::FrontdeskError;
use frontdesk_core::traits::MailerAdapter;
use frontdesk_core::types::OutboundEmail;
use tracing::{debug, warn};

pub use mailer::{LogMailer, SmtpMailer};
pub use templates::EmailTemplates;

/// Builds the mailer selected by configuration.
pub fn build_mailer(config: &EmailConfig) -> Result<Arc<dyn MailerAdapter>, FrontdeskError> {
    if config.enabled {
        Ok(Arc::new(SmtpMailer::new(config)?))
    } else {
        warn!("email.enabled is false; outgoing mail will only be logged");
        Ok(Arc::new(LogMailer::new(&config.company_email)))
    }
}

/// Sends one message, failing with [`FrontdeskError::Timeout`] when the
/// transport does not finish within `timeout`.
pub async fn send_with_timeout(
    mailer: &dyn MailerAdapter,
    email: OutboundEmail,
    timeout: Duration,
) -> Result<(), FrontdeskError> {
    let subject = email.subject.clone();
    match tokio::time::timeout(timeout, mailer.send(email)).await {
        Ok(result) => {
            if result.is_ok() {
                debug!(subject = %subject, "email sent");
            }
            result
        }
        Err(_) => Err(FrontdeskError::Timeout { duration: timeout }),
    }
}
