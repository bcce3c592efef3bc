// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead capture rows, unique per `(email, source)`.

use frontdesk_core::FrontdeskError;
use frontdesk_core::types::{LeadInsert, NewLead};
use rusqlite::{OptionalExtension, params};

use crate::database::{Database, map_tr_err};
use crate::models::{LEAD_COLUMNS, LeadSource, lead_from_row};

/// Insert a lead. An existing row for the same `(email, source)` is left
/// untouched and reported as a duplicate.
pub async fn insert_lead(
    db: &Database,
    source: LeadSource,
    lead: &NewLead,
    now: &str,
) -> Result<LeadInsert, FrontdeskError> {
    let lead = lead.clone();
    let now = now.to_string();
    db.connection()
        .call(move |conn| -> Result<LeadInsert, rusqlite::Error> {
            let inserted = conn
                .query_row(
                    &format!(
                        "INSERT INTO leads (email, source, name, phone, company, message, created_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                         ON CONFLICT(email, source) DO NOTHING
                         RETURNING {LEAD_COLUMNS}"
                    ),
                    params![
                        lead.email,
                        source.to_string(),
                        lead.name,
                        lead.phone,
                        lead.company,
                        lead.message,
                        now,
                    ],
                    lead_from_row,
                )
                .optional()?;
            Ok(LeadInsert {
                duplicate: inserted.is_none(),
                lead: inserted,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// Number of leads captured from `source`.
pub async fn count_leads(db: &Database, source: LeadSource) -> Result<u64, FrontdeskError> {
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.query_row(
                "SELECT COUNT(*) FROM leads WHERE source = ?1",
                params![source.to_string()],
                |row| row.get(0),
            )
        })
        .await
        .map_err(map_tr_err)
        .map(|count| u64::try_from(count).unwrap_or_default())
}
