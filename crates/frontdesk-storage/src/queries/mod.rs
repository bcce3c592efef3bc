// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for CRUD operations on storage entities.
//!
//! Every function takes an explicit timestamp where it writes one, so callers
//! (and tests) control ordering.

pub mod bookings;
pub mod conversations;
pub mod leads;
