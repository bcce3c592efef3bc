// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` so they can be held as `Arc<dyn ...>`.

pub mod adapter;
pub mod catalog;
pub mod mailer;
pub mod payment;
pub mod provider;
pub mod storage;

pub use adapter::PluginAdapter;
pub use catalog::CatalogAdapter;
pub use mailer::MailerAdapter;
pub use payment::PaymentAdapter;
pub use provider::ProviderAdapter;
pub use storage::StorageAdapter;
