// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned replies used when the completion provider fails.

use frontdesk_core::FrontdeskError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackReplies {
    pub high_demand: String,
    pub not_configured: String,
    pub generic: String,
}

impl FallbackReplies {
    pub fn new(brand: &str, contact_email: &str) -> Self {
        Self {
            high_demand: format!(
                "I apologize, but I'm currently experiencing high demand. Please feel free to \
                 reach out to us directly at {contact_email}, or visit our website to learn more \
                 about {brand}'s AI employees."
            ),
            not_configured: format!(
                "I apologize, but the AI service is currently being configured. Please contact \
                 us at {contact_email} for assistance, or visit our website to learn more about \
                 {brand}."
            ),
            generic: "I apologize, but I encountered an error processing your request. Please \
                      try again in a moment."
                .to_string(),
        }
    }

    /// Picks the reply matching a provider failure.
    pub fn for_error(&self, err: &FrontdeskError) -> &str {
        match err {
            FrontdeskError::QuotaExceeded { .. } => &self.high_demand,
            FrontdeskError::NotConfigured(_) => &self.not_configured,
            _ => &self.generic,
        }
    }
}
