// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API of the Frontdesk website backend.
//!
//! Public routes serve the website (chat widget, lead forms, checkout,
//! integration search, voice calls); `/admin/*` routes serve the operator
//! panel and require a bearer token. Every route is reachable both at the
//! root and under `/api`.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{Adapters, AppState, bind, cors_layer, router, serve};
