// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Website chat assistant with human handoff.
//!
//! [`ChatService`] answers visitor messages through the completion provider
//! while the bot serves a conversation; [`AdminService`] lets operators read
//! transcripts, reply, take over, and release.

pub mod admin;
pub mod attention;
pub mod fallback;
pub mod handler;
pub mod prompt;

pub use admin::{AdminAction, AdminOutcome, AdminService, ConversationView};
pub use attention::AttentionPolicy;
pub use handler::{ChatReply, ChatService};
pub use prompt::load_system_prompt;
