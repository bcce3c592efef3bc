// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request bodies and responses of the lead capture forms.
//!
//! Every field is optional at the type level so that missing input produces
//! the form's own validation message rather than a deserialization error.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaitlistForm {
    pub email: Option<String>,
    pub name: Option<String>,
    pub company: Option<String>,
    /// Job title; stored as the lead message.
    pub designation: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsletterForm {
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub booking_date: Option<String>,
    pub booking_time: Option<String>,
    pub company: Option<String>,
    pub company_size: Option<String>,
    pub agent_of_interest: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCallForm {
    pub agent_type: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub user_phone: Option<String>,
    pub prompt: Option<String>,
}

/// Outcome of a form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadReceipt {
    pub message: String,
    /// True when the `(email, source)` pair was already on file.
    pub duplicate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistCount {
    pub count: u64,
    pub base: u64,
    pub display_count: u64,
}

/// Everything the browser voice SDK needs to start a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSession {
    pub conversation_id: String,
    pub agent_id: String,
    pub message: String,
    #[serde(rename = "webRTCEnabled")]
    pub web_rtc_enabled: bool,
    pub public_api_key: String,
    pub variables: VoiceVariables,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VoiceVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}
