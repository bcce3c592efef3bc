// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Frontdesk tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - completion provider with scripted replies and failures
//! - [`MockMailer`], [`MockPayments`], [`MockCatalog`] - recording upstream mocks
//! - [`TestHarness`] - temp SQLite store plus all mocks

pub mod harness;
pub mod mock_provider;
pub mod mock_services;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_provider::{MockProvider, MockReply};
pub use mock_services::{MockCatalog, MockMailer, MockPayments};
