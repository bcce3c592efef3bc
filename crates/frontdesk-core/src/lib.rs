// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Frontdesk backend.
//!
//! This crate provides the error type, the domain types shared by every
//! crate (conversations, leads, bookings, completion and mail payloads), and
//! the adapter traits that storage and upstream-service crates implement.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::FrontdeskError;
pub use types::{AdapterType, HandoffStatus, HealthStatus, Role};

// Re-export all adapter traits at crate root.
pub use traits::{
    CatalogAdapter, MailerAdapter, PaymentAdapter, PluginAdapter, ProviderAdapter,
    StorageAdapter,
};
