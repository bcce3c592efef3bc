// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Demo bookings keyed by their manage-link token.

use frontdesk_core::FrontdeskError;
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::models::DemoBooking;

pub async fn save_booking(db: &Database, booking: &DemoBooking) -> Result<(), FrontdeskError> {
    let b = booking.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO demo_bookings (token, name, email, phone, booking_date, booking_time,
                     company, company_size, agent_of_interest, message, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    b.token,
                    b.name,
                    b.email,
                    b.phone,
                    b.booking_date,
                    b.booking_time,
                    b.company,
                    b.company_size,
                    b.agent_of_interest,
                    b.message,
                    b.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
