// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead capture for the marketing site: waitlist, newsletter, demo booking,
//! and voice-call bootstrap.

pub mod forms;
pub mod service;
pub mod validation;
pub mod voice;

pub use forms::{
    DemoForm, LeadReceipt, NewsletterForm, VoiceCallForm, VoiceSession, WaitlistCount,
    WaitlistForm,
};
pub use service::LeadService;
pub use voice::VoiceService;
